use crate::config::ContactConfig;
use crate::contact::{ContactForm, SubmissionRecord, SubmitOutcome, SubmitStart};
use crate::page::ContactPage;
use async_trait::async_trait;
use log::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

/// Errors raised while delivering a submission.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("the contact endpoint did not accept the submission")]
    Unavailable,
}

/// Something that can wait without blocking the event loop.
///
#[async_trait(?Send)]
pub trait Delay {
    async fn sleep(&self, duration: Duration);
}

/// Delivers a submission record somewhere.
///
#[async_trait(?Send)]
pub trait Transport {
    async fn deliver(&mut self, record: &SubmissionRecord) -> Result<(), TransportError>;
}

/// Delay backed by the tokio timer.
///
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioDelay;

#[cfg(not(target_arch = "wasm32"))]
#[async_trait(?Send)]
impl Delay for TokioDelay {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Stand-in for a backend endpoint: waits for the configured latency, then
/// succeeds with the configured probability.
///
pub struct SimulatedTransport<D: Delay> {
    delay: D,
    latency: Duration,
    success_rate: f64,
    rng: StdRng,
}

impl<D: Delay> SimulatedTransport<D> {
    pub fn new(delay: D, config: &ContactConfig) -> Self {
        SimulatedTransport {
            delay,
            latency: config.submit_delay(),
            success_rate: config.success_rate.clamp(0.0, 1.0),
            rng: StdRng::from_entropy(),
        }
    }

    /// Use a fixed seed so outcomes are reproducible.
    ///
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }
}

#[async_trait(?Send)]
impl<D: Delay> Transport for SimulatedTransport<D> {
    async fn deliver(&mut self, record: &SubmissionRecord) -> Result<(), TransportError> {
        debug!("Delivering submission from {}...", record.email);
        self.delay.sleep(self.latency).await;
        if self.rng.gen_bool(self.success_rate) {
            Ok(())
        } else {
            Err(TransportError::Unavailable)
        }
    }
}

/// Specify struct for driving a submission with shared form state.
///
pub struct Handler<'a, P: ContactPage> {
    form: &'a Arc<Mutex<ContactForm<P>>>,
    transport: &'a mut dyn Transport,
}

impl<'a, P: ContactPage> Handler<'a, P> {
    /// Return new instance with reference to the form.
    ///
    pub fn new(form: &'a Arc<Mutex<ContactForm<P>>>, transport: &'a mut dyn Transport) -> Self {
        Handler { form, transport }
    }

    /// Validate, deliver and apply the result. The form lock is released
    /// while the transport is in flight.
    ///
    pub async fn submit(&mut self) -> SubmitOutcome {
        let start = {
            let mut form = self.form.lock().await;
            form.begin_submission()
        };
        let record = match start {
            SubmitStart::Started(record) => record,
            other => {
                debug!("Submission not started: {:?}", other);
                return SubmitOutcome::NotStarted;
            }
        };

        let result = self.transport.deliver(&record).await;

        let mut form = self.form.lock().await;
        form.finish_submission(&record, result)
    }
}
