//! Benchmarks for contact form validation.
//!
//! These benchmarks measure the field validators and a full form pass.

use aventura_site::config::ContactConfig;
use aventura_site::contact::{ContactForm, Field, Validator};
use aventura_site::page::MemoryForm;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bench_validator_compile(c: &mut Criterion) {
    let config = ContactConfig::default();
    c.bench_function("validator_compile_patterns", |b| {
        b.iter(|| Validator::new(black_box(&config)))
    });
}

fn bench_name_validation(c: &mut Criterion) {
    let validator = Validator::new(&ContactConfig::default()).unwrap();
    c.bench_function("validate_accented_name", |b| {
        b.iter(|| validator.name(black_box("  Ana Luísa Conceição  ")))
    });
}

fn bench_email_validation(c: &mut Criterion) {
    let validator = Validator::new(&ContactConfig::default()).unwrap();
    c.bench_function("validate_email", |b| {
        b.iter(|| validator.email(black_box("viajante.frequente@aventura.com.br")))
    });
}

fn bench_form_validation(c: &mut Criterion) {
    let mut page = MemoryForm::new();
    page.set_value(Field::Name, "Maria Clara")
        .set_value(Field::Email, "maria@exemplo.com")
        .set_value(Field::Subject, "pacotes")
        .set_value(Field::Message, "Gostaria de um orçamento para Lençóis Maranhenses.");
    let mut form = ContactForm::new(page, ContactConfig::default()).unwrap();
    form.init();

    c.bench_function("validate_full_form", |b| b.iter(|| form.validate_form()));
}

criterion_group!(
    benches,
    bench_validator_compile,
    bench_name_validation,
    bench_email_validation,
    bench_form_validation
);
criterion_main!(benches);
