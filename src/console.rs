//! Line-oriented admin console.
//!
//! The console is the host for one [`Navigator`]: it parses a command line,
//! runs it against the session store / navigator, and renders a text reply.
//! Parsing is pure so it can be tested without a provider.

use crate::auth::AuthError;
use crate::navigation::{DEFAULT_AUTHENTICATED_PATH, LOGIN_PATH, Landing, NavigationError, Navigator};
use crate::notifications::templates::UnknownCategory;
use crate::notifications::{self, Destination, NotificationCategory, NotificationTemplate};

pub const HELP: &str = "\
commands:
  login <email> <password>   sign in and open the dashboard
  logout                     sign out
  whoami                     show the signed-in admin
  goto <path>                navigate (e.g. goto /orders)
  where                      show the current page
  templates [category]       list notification templates
  template <id>              show one template and its JSON
  help                       this text
  quit                       exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Login { email: String, password: String },
    Logout,
    Whoami,
    Goto(String),
    Where,
    Templates(Option<NotificationCategory>),
    Template(String),
    Help,
    Quit,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command `{0}` (try `help`)")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error(transparent)]
    Category(#[from] UnknownCategory),
}

#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    /// Rejected credentials, unreachable provider, or a timed-out sign-in.
    #[error("could not sign in: {0}")]
    LoginFailed(AuthError),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Navigation(#[from] NavigationError),
    #[error("template not found: {0}")]
    TemplateNotFound(String),
    #[error("render failed: {0}")]
    Render(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    Quit,
}

/// Parse one input line.
///
/// # Errors
///
/// Returns [`CommandError`] for blank, unknown, or malformed commands.
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Err(CommandError::Empty);
    };
    let args: Vec<&str> = words.collect();

    match (verb.to_ascii_lowercase().as_str(), args.as_slice()) {
        ("login", [email, password]) => Ok(Command::Login { email: (*email).to_owned(), password: (*password).to_owned() }),
        ("login", _) => Err(CommandError::Usage("login <email> <password>")),
        ("logout", []) => Ok(Command::Logout),
        ("whoami", []) => Ok(Command::Whoami),
        ("goto", [path]) => Ok(Command::Goto((*path).to_owned())),
        ("goto", _) => Err(CommandError::Usage("goto <path>")),
        ("where", []) => Ok(Command::Where),
        ("templates", []) => Ok(Command::Templates(None)),
        ("templates", [category]) => Ok(Command::Templates(Some(category.parse()?))),
        ("templates", _) => Err(CommandError::Usage("templates [category]")),
        ("template", [id]) => Ok(Command::Template((*id).to_owned())),
        ("template", _) => Err(CommandError::Usage("template <id>")),
        ("help" | "?", _) => Ok(Command::Help),
        ("quit" | "exit", _) => Ok(Command::Quit),
        (other, _) => Err(CommandError::Unknown(other.to_owned())),
    }
}

pub struct Console {
    navigator: Navigator,
}

impl Console {
    #[must_use]
    pub fn new(navigator: Navigator) -> Self {
        Self { navigator }
    }

    #[must_use]
    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// Run one command.
    ///
    /// # Errors
    ///
    /// Surfaces login failures, blocked navigations, and unknown templates.
    pub async fn execute(&mut self, command: Command) -> Result<Reply, ConsoleError> {
        let text = match command {
            Command::Login { email, password } => {
                self.navigator.store().login(&email, &password).await.map_err(|e| {
                    if e.is_authentication_failure() {
                        ConsoleError::LoginFailed(e)
                    } else {
                        ConsoleError::Auth(e)
                    }
                })?;
                let landing = self.navigator.navigate(DEFAULT_AUTHENTICATED_PATH).await?;
                describe_landing(&landing)
            }
            Command::Logout => {
                self.navigator.store().logout().await?;
                let landing = self.navigator.navigate(LOGIN_PATH).await?;
                format!("signed out\n{}", describe_landing(&landing))
            }
            Command::Whoami => match self.navigator.store().user() {
                Some(user) => format!(
                    "{} <{}> role={}",
                    user.id,
                    user.email.as_deref().unwrap_or("-"),
                    user.role().unwrap_or("-")
                ),
                None => "not signed in".to_owned(),
            },
            Command::Goto(path) => {
                let landing = self.navigator.navigate(&path).await?;
                describe_landing(&landing)
            }
            Command::Where => match self.navigator.current() {
                Some(route) => route.to_string(),
                None => "nowhere yet".to_owned(),
            },
            Command::Templates(category) => list_templates(category),
            Command::Template(id) => {
                let template = notifications::find(&id).ok_or(ConsoleError::TemplateNotFound(id))?;
                format!("{}\n{}", describe_template(template), serde_json::to_string_pretty(template)?)
            }
            Command::Help => HELP.to_owned(),
            Command::Quit => return Ok(Reply::Quit),
        };
        Ok(Reply::Text(text))
    }
}

fn describe_landing(landing: &Landing) -> String {
    if landing.redirected {
        format!("{} (redirected from {})", landing.route, landing.requested)
    } else {
        landing.route.to_string()
    }
}

fn list_templates(category: Option<NotificationCategory>) -> String {
    let templates: Vec<&NotificationTemplate> = match category {
        Some(c) => notifications::by_category(c).collect(),
        None => notifications::catalog().iter().collect(),
    };
    if templates.is_empty() {
        return "no templates".to_owned();
    }
    templates
        .iter()
        .map(|t| format!("{:<16} [{}] {}", t.id, t.category, t.title))
        .collect::<Vec<_>>()
        .join("\n")
}

fn describe_template(template: &NotificationTemplate) -> String {
    let link = match template.destination() {
        Destination::Route(route) => format!("opens {route}"),
        Destination::External(url) => format!("opens {url}"),
        Destination::Unlinked => "no link".to_owned(),
    };
    format!(
        "{} [{}] priority={} {link}",
        template.id,
        template.category,
        template.priority().unwrap_or("-")
    )
}

#[cfg(test)]
#[path = "console_test.rs"]
mod tests;
