//! Channel selection for a selected result.

use crate::action::ContactAction;
use crate::error::Result;
use crate::template::MessageTemplate;
use karia_core::config::ContactConfig;
use karia_search::SearchResultItem;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Channel explicitly requested by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    /// Phone call
    Call,
    /// WhatsApp chat
    WhatsApp,
}

/// Builds contact actions from the configured mediator and support numbers.
#[derive(Debug, Clone)]
pub struct ContactPlanner {
    mediator_whatsapp: String,
    mediator_phone: String,
    support_phone: String,
}

impl ContactPlanner {
    /// Planner using configured numbers.
    #[must_use]
    pub fn new(config: &ContactConfig) -> Self {
        Self {
            mediator_whatsapp: config.mediator_whatsapp.clone(),
            mediator_phone: config.mediator_phone.clone(),
            support_phone: config.support_phone.clone(),
        }
    }

    /// Default action: dial the listed phone, otherwise WhatsApp the mediator.
    pub fn for_item(&self, item: &SearchResultItem) -> Result<ContactAction> {
        match item.phone {
            Some(ref phone) => Ok(ContactAction::dial(phone)),
            None => self.whatsapp_item(item),
        }
    }

    /// Action over an explicit channel.
    ///
    /// Calls go to the listed phone, or to the mediator when there is none.
    /// WhatsApp always goes through the mediator.
    pub fn via(&self, item: &SearchResultItem, channel: Channel) -> Result<ContactAction> {
        match channel {
            Channel::Call => Ok(ContactAction::dial(
                item.phone.as_deref().unwrap_or(&self.mediator_phone),
            )),
            Channel::WhatsApp => self.whatsapp_item(item),
        }
    }

    /// Call customer support.
    #[must_use]
    pub fn support_call(&self) -> ContactAction {
        ContactAction::dial(&self.support_phone)
    }

    /// Message the mediator for support.
    pub fn support_whatsapp(&self) -> Result<ContactAction> {
        ContactAction::whatsapp(&self.mediator_whatsapp, MessageTemplate::Support.render())
    }

    fn whatsapp_item(&self, item: &SearchResultItem) -> Result<ContactAction> {
        let message = MessageTemplate::for_item(item).render();
        debug!(key = %item.key, "WhatsApp handoff via mediator");
        ContactAction::whatsapp(&self.mediator_whatsapp, message)
    }
}

impl Default for ContactPlanner {
    fn default() -> Self {
        Self::new(&ContactConfig::default())
    }
}
