use crate::domain::model::{StoredSubscriber, SubscriberSignup};
use crate::domain::ports::OrderStore;
use crate::utils::error::Result;
use crate::utils::validation::{
    require, require_email, FieldError, ValidationErrors, CONSENT_MESSAGE,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub consent: bool,
}

impl SignupForm {
    pub fn validate(&self) -> std::result::Result<SubscriberSignup, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let name = errors.collect(require("name", &self.name));
        let email = errors.collect(require_email("email", &self.email));
        if !self.consent {
            errors.push(FieldError::new("consent", CONSENT_MESSAGE));
        }

        match (name, email) {
            (Some(name), Some(email)) if errors.is_empty() => Ok(SubscriberSignup {
                name,
                email,
                consent: true,
            }),
            _ => Err(errors),
        }
    }
}

pub struct Newsletter<S: OrderStore> {
    store: S,
}

impl<S: OrderStore> Newsletter<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn subscribe(&self, form: &SignupForm) -> Result<StoredSubscriber> {
        let signup = form.validate()?;

        tracing::info!("📬 Subscribing {} to the newsletter", signup.email);
        let subscriber = self.store.insert_subscriber(&signup).await.map_err(|e| {
            tracing::error!("❌ Newsletter subscription failed: {}", e);
            e
        })?;

        tracing::info!("✅ Subscribed {}", subscriber.email);
        Ok(subscriber)
    }
}
