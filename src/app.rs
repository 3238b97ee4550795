use crate::config::SiteConfig;
use crate::contact::{ContactForm, FieldEvent, SubmitOutcome};
use crate::events::network::{Handler as NetworkEventHandler, Transport};
use crate::events::site::{handle as handle_site_event, Event as SiteEvent, Response};
use crate::interaction::InteractionController;
use crate::logger::{self, LogSink};
use crate::page::{ContactPage, SitePage};
use anyhow::{Context, Result};
use log::*;
use std::sync::Arc;
use tokio::sync::Mutex;

pub type SharedContactForm<C> = Arc<Mutex<ContactForm<C>>>;

/// Load the site configuration from optional YAML overrides.
///
pub fn load_config(config_yaml: Option<&str>) -> Result<SiteConfig> {
    match config_yaml {
        Some(contents) => SiteConfig::from_yaml(contents).context("Failed to load site configuration"),
        None => Ok(SiteConfig::default()),
    }
}

/// Oversees both page controllers for the lifetime of a page.
///
pub struct Site<C: ContactPage, S: SitePage> {
    config: SiteConfig,
    contact: Option<SharedContactForm<C>>,
    interaction: InteractionController<S>,
}

impl<C: ContactPage, S: SitePage> Site<C, S> {
    /// Start the site scripts. Validates the configuration, installs the
    /// logger when a sink is given, and initializes the contact form (only on
    /// pages that have one) and the page interactions.
    ///
    pub fn start(
        config: SiteConfig,
        contact_page: Option<C>,
        site_page: S,
        sink: Option<LogSink>,
    ) -> Result<Self> {
        config.validate().context("Invalid site configuration")?;
        if let Some(sink) = sink {
            let level = config.level_filter()?;
            logger::init(level, sink).context("Failed to install logger")?;
        }

        info!("Starting site scripts...");
        let contact = match contact_page {
            Some(page) => {
                let mut form = ContactForm::new(page, config.contact.clone())?;
                form.init();
                Some(Arc::new(Mutex::new(form)))
            }
            None => {
                debug!("No contact form on this page");
                None
            }
        };
        let mut interaction = InteractionController::new(site_page, &config);
        interaction.init();
        info!("Site scripts ready.");

        Ok(Site {
            config,
            contact,
            interaction,
        })
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn contact_form(&self) -> Option<&SharedContactForm<C>> {
        self.contact.as_ref()
    }

    pub fn interaction(&self) -> &InteractionController<S> {
        &self.interaction
    }

    pub fn interaction_mut(&mut self) -> &mut InteractionController<S> {
        &mut self.interaction
    }

    /// Route a page event to the interaction controller.
    ///
    pub fn dispatch(&mut self, event: SiteEvent) -> Response {
        handle_site_event(&mut self.interaction, event)
    }

    /// Route a field event to the contact form. Returns false when there is
    /// no form or it is busy being updated by a submission step.
    ///
    pub fn field_event(&self, event: FieldEvent) -> bool {
        let Some(contact) = &self.contact else {
            return false;
        };
        match contact.try_lock() {
            Ok(mut form) => {
                form.handle(event);
                true
            }
            Err(_) => {
                warn!("Contact form locked, dropping field event '{:?}'", event);
                false
            }
        }
    }

    /// Run one submission through `transport`.
    ///
    pub async fn submit(&self, transport: &mut dyn Transport) -> SubmitOutcome {
        match &self.contact {
            Some(contact) => NetworkEventHandler::new(contact, transport).submit().await,
            None => SubmitOutcome::NotStarted,
        }
    }

    /// Tear down both controllers. Later events and in-flight results are
    /// ignored.
    ///
    pub fn teardown(&mut self) {
        if let Some(contact) = &self.contact {
            match contact.try_lock() {
                Ok(mut form) => form.teardown(),
                Err(_) => error!("Contact form locked during teardown"),
            }
        }
        self.interaction.teardown();
        info!("Exiting site scripts...");
    }
}
