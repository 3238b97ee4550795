//! User-facing text for the contact form (pt-BR).

use super::field::Field;
use super::validation::ValidationError;

pub const FIX_ERRORS: &str = "Por favor, corrija os erros antes de enviar.";

/// Localized text shown in a field's error slot.
///
pub fn field_error(field: Field, error: &ValidationError) -> String {
    match (field, error) {
        (Field::Name, ValidationError::Required) => "Nome é obrigatório".to_string(),
        (Field::Name, ValidationError::TooShort { min }) => {
            format!("Nome deve ter pelo menos {} caracteres", min)
        }
        (Field::Name, _) => "Nome deve conter apenas letras e espaços".to_string(),
        (Field::Email, ValidationError::Required) => "E-mail é obrigatório".to_string(),
        (Field::Email, _) => "Por favor, insira um e-mail válido".to_string(),
        (Field::Subject, _) => "Por favor, selecione um assunto".to_string(),
        (Field::Message, ValidationError::TooShort { min }) => {
            format!("Mensagem deve ter pelo menos {} caracteres", min)
        }
        (Field::Message, _) => "Mensagem é obrigatória".to_string(),
    }
}

pub fn submission_success(name: &str, email: &str) -> String {
    format!(
        "Obrigado, {}! Sua mensagem foi enviada com sucesso. Nossa equipe entrará em contato em breve através do e-mail {}.",
        name, email
    )
}

pub fn submission_failure(phone: &str) -> String {
    format!(
        "Ocorreu um erro ao enviar sua mensagem. Por favor, tente novamente ou entre em contato conosco diretamente pelo telefone {}.",
        phone
    )
}
