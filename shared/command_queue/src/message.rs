use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Known destinations for commands
///
/// Each route maps to the SQS queue of the same name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumString)]
pub enum Route {
    /// Queue consumed by the email sender
    EmailBox,
}

/// Command asking the email sender to deliver a message
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SendEmailCommand {
    /// Recipient address
    pub to: String,
    /// Subject line
    pub subject: String,
    /// Message body
    pub body: String,
}

impl SendEmailCommand {
    /// Creates a new send email command
    #[must_use]
    pub fn new(to: impl Into<String>, subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            body: body.into(),
        }
    }
}

/// Closed set of command payloads that can travel in an [`Envelope`]
///
/// Payloads are untagged on the wire: the envelope's `route` identifies the destination
/// and the payload fields sit next to it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Command {
    /// Send an email
    SendEmail(SendEmailCommand),
}

impl Command {
    /// Returns the fixed route of this command
    #[must_use]
    pub const fn route(&self) -> Route {
        match self {
            Self::SendEmail(_) => Route::EmailBox,
        }
    }
}

impl From<SendEmailCommand> for Command {
    fn from(command: SendEmailCommand) -> Self {
        Self::SendEmail(command)
    }
}

/// Message envelope carrying a route and a command payload
///
/// Serializes to a flat JSON object, e.g.
/// `{"route":"EmailBox","to":"a@b.com","subject":"Hi","body":"Hello"}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Envelope {
    route: String,
    #[serde(flatten)]
    command: Command,
}

impl Envelope {
    /// Wraps a command, taking the route from the command variant
    #[must_use]
    pub fn new(command: impl Into<Command>) -> Self {
        let command = command.into();
        Self {
            route: command.route().to_string(),
            command,
        }
    }

    /// Destination queue name
    #[must_use]
    pub fn route(&self) -> &str {
        &self.route
    }

    /// Command payload
    #[must_use]
    pub const fn command(&self) -> &Command {
        &self.command
    }

    /// Consumes the envelope and returns the command payload
    #[must_use]
    pub fn into_command(self) -> Command {
        self.command
    }
}

impl From<SendEmailCommand> for Envelope {
    fn from(command: SendEmailCommand) -> Self {
        Self::new(command)
    }
}

/// Trait for extracting message group ID for FIFO queues
pub trait MessageGroupId {
    /// Returns the message group ID for FIFO queue ordering
    fn message_group_id(&self) -> String;
}

impl MessageGroupId for Command {
    fn message_group_id(&self) -> String {
        match self {
            Self::SendEmail(SendEmailCommand { to, .. }) => to.clone(),
        }
    }
}

impl MessageGroupId for Envelope {
    fn message_group_id(&self) -> String {
        self.command.message_group_id()
    }
}
