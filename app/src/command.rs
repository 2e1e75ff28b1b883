//! Terminal commands.
//!
//! A line of input parses into a [`Command`]; [`Command::resolve`] turns it
//! into an [`AppAction`] against the current state, or into a client-side
//! request such as export or quit.

use crate::app::{AppAction, AppState, Screen};
use crate::payment::{PaymentError, PaymentMethod};
use crate::schedule::Slot;
use crate::types::Role;
use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

/// Usage text printed by `help`
pub const HELP: &str = "\
login:    login <user|admin> <name> | <email> | <mobile>, verify <otp>, edit
home:     city, city <query>, pick <city>, close, book <n>
slots:    date <n|YYYY-MM-DD>, slot <n>, continue, back
payment:  pay upi <id>, pay card, pay netbanking <bank>, back
success:  home
admin:    search [query], export <path>
anywhere: logout, help, show, quit";

/// Command parsing and resolution errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Blank line
    #[error("no command given")]
    Empty,

    /// Unrecognised keyword
    #[error("unknown command '{0}', type 'help' for a list")]
    Unknown(String),

    /// Recognised keyword, wrong arguments
    #[error("usage: {0}")]
    Usage(&'static str),

    /// Payment method rejected
    #[error(transparent)]
    Payment(#[from] PaymentError),

    /// A numbered choice that does not exist
    #[error("no {what} numbered {index}")]
    OutOfRange {
        /// What was being chosen
        what: &'static str,
        /// The 1-based number given
        index: usize,
    },

    /// Command not available on the current screen
    #[error("'{0}' is not available here")]
    NotHere(&'static str),
}

/// Date argument of `date`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateChoice {
    /// 1-based position in the booking window
    Nth(usize),
    /// Calendar date
    On(NaiveDate),
}

/// A parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `login <role> <name> | <email> | <mobile>`
    Login {
        /// Role
        role: Role,
        /// Name
        name: String,
        /// Email
        email: String,
        /// Mobile
        mobile: String,
    },
    /// `verify <otp>`
    Verify(String),
    /// `edit`
    Edit,
    /// `city` opens the picker, `city <query>` filters it
    City(Option<String>),
    /// `pick <city>`
    Pick(String),
    /// `close`
    Close,
    /// `book <n>`
    Book(usize),
    /// `date <n|YYYY-MM-DD>`
    Date(DateChoice),
    /// `slot <n>`
    Slot(usize),
    /// `continue`
    Continue,
    /// `back`
    Back,
    /// `pay <method> [arg]`
    Pay(PaymentMethod),
    /// `home`
    Home,
    /// `search [query]`
    Search(String),
    /// `export <path>`
    Export(PathBuf),
    /// `logout`
    Logout,
    /// `help`
    Help,
    /// `show`
    Show,
    /// `quit`
    Quit,
}

/// What the terminal should do with a command
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved {
    /// Send to the store
    Dispatch(AppAction),
    /// Write the visible admin rows to a file
    Export(PathBuf),
    /// Print usage
    Help,
    /// Re-render
    Show,
    /// Shut down
    Quit,
}

fn number(argument: &str, usage: &'static str) -> Result<usize, CommandError> {
    argument
        .parse::<usize>()
        .ok()
        .filter(|n| *n > 0)
        .ok_or(CommandError::Usage(usage))
}

fn required(argument: &str, usage: &'static str) -> Result<String, CommandError> {
    if argument.is_empty() {
        Err(CommandError::Usage(usage))
    } else {
        Ok(argument.to_string())
    }
}

impl Command {
    /// Parse one input line
    ///
    /// # Errors
    ///
    /// Returns [`CommandError`] for blank lines, unknown keywords and
    /// ill-formed arguments.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        if line.is_empty() {
            return Err(CommandError::Empty);
        }
        let (keyword, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        match keyword.to_ascii_lowercase().as_str() {
            "login" => Self::parse_login(rest),
            "verify" => Ok(Self::Verify(required(rest, "verify <otp>")?)),
            "edit" => Ok(Self::Edit),
            "city" => Ok(Self::City((!rest.is_empty()).then(|| rest.to_string()))),
            "pick" => Ok(Self::Pick(required(rest, "pick <city>")?)),
            "close" => Ok(Self::Close),
            "book" => Ok(Self::Book(number(rest, "book <n>")?)),
            "date" => {
                const USAGE: &str = "date <n|YYYY-MM-DD>";
                if let Ok(date) = NaiveDate::parse_from_str(rest, "%Y-%m-%d") {
                    Ok(Self::Date(DateChoice::On(date)))
                } else {
                    Ok(Self::Date(DateChoice::Nth(number(rest, USAGE)?)))
                }
            },
            "slot" => Ok(Self::Slot(number(rest, "slot <n>")?)),
            "continue" => Ok(Self::Continue),
            "back" => Ok(Self::Back),
            "pay" => {
                let (method, argument) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                if method.is_empty() {
                    return Err(CommandError::Usage("pay upi <id> | pay card | pay netbanking <bank>"));
                }
                Ok(Self::Pay(PaymentMethod::parse(method, argument.trim())?))
            },
            "home" => Ok(Self::Home),
            "search" => Ok(Self::Search(rest.to_string())),
            "export" => Ok(Self::Export(PathBuf::from(required(rest, "export <path>")?))),
            "logout" => Ok(Self::Logout),
            "help" => Ok(Self::Help),
            "show" => Ok(Self::Show),
            "quit" | "exit" => Ok(Self::Quit),
            _ => Err(CommandError::Unknown(keyword.to_string())),
        }
    }

    fn parse_login(rest: &str) -> Result<Self, CommandError> {
        const USAGE: &str = "login <user|admin> <name> | <email> | <mobile>";

        let (role, details) = rest
            .split_once(char::is_whitespace)
            .ok_or(CommandError::Usage(USAGE))?;
        let role = role.parse::<Role>().map_err(|_| CommandError::Usage(USAGE))?;

        let fields: Vec<&str> = details.split('|').map(str::trim).collect();
        let [name, email, mobile] = fields[..] else {
            return Err(CommandError::Usage(USAGE));
        };

        Ok(Self::Login {
            role,
            name: name.to_string(),
            email: email.to_string(),
            mobile: mobile.to_string(),
        })
    }

    /// Turn the command into what the terminal should do
    ///
    /// Numbered choices are resolved against `state` (venues) and `window`
    /// (selectable dates). Screen checks beyond numbering are left to the
    /// reducer, which ignores actions meant for another screen.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::OutOfRange`] for a number with no matching
    /// venue, date or slot, and [`CommandError::NotHere`] for `back` outside
    /// the slot and payment screens.
    pub fn resolve(self, state: &AppState, window: &[NaiveDate]) -> Result<Resolved, CommandError> {
        let action = match self {
            Self::Login {
                role,
                name,
                email,
                mobile,
            } => AppAction::SubmitLoginDetails {
                role,
                name,
                email,
                mobile,
            },
            Self::Verify(otp) => AppAction::VerifyOtp { otp },
            Self::Edit => AppAction::EditLoginDetails,
            Self::City(None) => AppAction::OpenLocationPicker,
            Self::City(Some(query)) => AppAction::SearchCities { query },
            Self::Pick(city) => AppAction::SelectCity { city },
            Self::Close => AppAction::CloseLocationPicker,
            Self::Book(index) => {
                let venue = index
                    .checked_sub(1)
                    .and_then(|i| state.venues.get(i))
                    .ok_or(CommandError::OutOfRange { what: "venue", index })?;
                AppAction::SelectVenue {
                    venue_id: venue.id.clone(),
                }
            },
            Self::Date(DateChoice::On(date)) => AppAction::SelectDate { date },
            Self::Date(DateChoice::Nth(index)) => {
                let date = index
                    .checked_sub(1)
                    .and_then(|i| window.get(i))
                    .ok_or(CommandError::OutOfRange { what: "date", index })?;
                AppAction::SelectDate { date: *date }
            },
            Self::Slot(index) => {
                let slot = index.checked_sub(1).and_then(Slot::from_index).ok_or(CommandError::OutOfRange {
                    what: "slot",
                    index,
                })?;
                AppAction::ToggleSlot { slot }
            },
            Self::Continue => AppAction::ContinueToPayment,
            Self::Back => match state.screen {
                Screen::Slots(_) => AppAction::BackToHome,
                Screen::Payment(_) => AppAction::BackToSlots,
                _ => return Err(CommandError::NotHere("back")),
            },
            Self::Pay(method) => AppAction::SubmitPayment { method },
            Self::Home => AppAction::ReturnHome,
            Self::Search(query) => AppAction::SearchBookings { query },
            Self::Export(path) => {
                if !matches!(state.screen, Screen::Admin(_)) {
                    return Err(CommandError::NotHere("export"));
                }
                return Ok(Resolved::Export(path));
            },
            Self::Logout => AppAction::Logout,
            Self::Help => return Ok(Resolved::Help),
            Self::Show => return Ok(Resolved::Show),
            Self::Quit => return Ok(Resolved::Quit),
        };
        Ok(Resolved::Dispatch(action))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::app::{SlotSelection, ScreenKind};
    use crate::gateway::memory::sample_venues;
    use crate::payment::Bank;

    fn window() -> Vec<NaiveDate> {
        crate::schedule::booking_window(NaiveDate::from_ymd_opt(2025, 1, 25).unwrap(), 7)
    }

    fn home() -> AppState {
        let mut state = AppState::signed_out("Bengaluru");
        state.screen = Screen::landing(Role::User);
        state.venues = sample_venues();
        state
    }

    #[test]
    fn parses_login_details() {
        assert_eq!(
            Command::parse("login admin Rahul Sharma | rahul@example.com | 98765").unwrap(),
            Command::Login {
                role: Role::Admin,
                name: "Rahul Sharma".to_string(),
                email: "rahul@example.com".to_string(),
                mobile: "98765".to_string(),
            }
        );
        assert_eq!(
            Command::parse("login user Rahul | rahul@example.com"),
            Err(CommandError::Usage("login <user|admin> <name> | <email> | <mobile>"))
        );
        assert!(matches!(
            Command::parse("login guest a | b | c"),
            Err(CommandError::Usage(_))
        ));
    }

    #[test]
    fn parses_keywords_case_insensitively() {
        assert_eq!(Command::parse("  CONTINUE ").unwrap(), Command::Continue);
        assert_eq!(Command::parse("city").unwrap(), Command::City(None));
        assert_eq!(
            Command::parse("city  madu").unwrap(),
            Command::City(Some("madu".to_string()))
        );
        assert_eq!(Command::parse("search").unwrap(), Command::Search(String::new()));
    }

    #[test]
    fn parses_dates_both_ways() {
        assert_eq!(
            Command::parse("date 2").unwrap(),
            Command::Date(DateChoice::Nth(2))
        );
        assert_eq!(
            Command::parse("date 2025-01-27").unwrap(),
            Command::Date(DateChoice::On(NaiveDate::from_ymd_opt(2025, 1, 27).unwrap()))
        );
        assert!(Command::parse("date tomorrow").is_err());
        assert!(Command::parse("slot 0").is_err());
    }

    #[test]
    fn parses_payment_methods() {
        assert_eq!(
            Command::parse("pay upi askar@okbank").unwrap(),
            Command::Pay(PaymentMethod::upi("askar@okbank").unwrap())
        );
        assert_eq!(Command::parse("pay card").unwrap(), Command::Pay(PaymentMethod::Card));
        assert_eq!(
            Command::parse("pay netbanking icici bank").unwrap(),
            Command::Pay(PaymentMethod::NetBanking { bank: Bank::Icici })
        );
        assert_eq!(
            Command::parse("pay upi"),
            Err(CommandError::Payment(PaymentError::MissingUpiId))
        );
    }

    #[test]
    fn rejects_unknown_and_empty() {
        assert_eq!(Command::parse("   "), Err(CommandError::Empty));
        assert_eq!(
            Command::parse("dance now"),
            Err(CommandError::Unknown("dance".to_string()))
        );
    }

    #[test]
    fn numbered_choices_resolve_against_state() {
        let state = home();

        assert_eq!(
            Command::Book(2).resolve(&state, &window()).unwrap(),
            Resolved::Dispatch(AppAction::SelectVenue {
                venue_id: sample_venues()[1].id.clone()
            })
        );
        assert_eq!(
            Command::Book(9).resolve(&state, &window()),
            Err(CommandError::OutOfRange {
                what: "venue",
                index: 9
            })
        );
        assert_eq!(
            Command::Date(DateChoice::Nth(1)).resolve(&state, &window()).unwrap(),
            Resolved::Dispatch(AppAction::SelectDate { date: window()[0] })
        );
        assert!(Command::Slot(17).resolve(&state, &window()).is_err());
        assert_eq!(
            Command::Slot(16).resolve(&state, &window()).unwrap(),
            Resolved::Dispatch(AppAction::ToggleSlot {
                slot: Slot::from_index(15).unwrap()
            })
        );
    }

    #[test]
    fn back_depends_on_screen() {
        let mut state = home();
        assert_eq!(
            Command::Back.resolve(&state, &window()),
            Err(CommandError::NotHere("back"))
        );

        state.screen = Screen::Slots(SlotSelection::new(sample_venues()[0].clone(), 300));
        assert_eq!(state.screen.kind(), ScreenKind::Slots);
        assert_eq!(
            Command::Back.resolve(&state, &window()).unwrap(),
            Resolved::Dispatch(AppAction::BackToHome)
        );
    }

    #[test]
    fn export_only_from_admin() {
        let mut state = home();
        assert!(Command::Export("out.csv".into()).resolve(&state, &window()).is_err());

        state.screen = Screen::landing(Role::Admin);
        assert_eq!(
            Command::Export("out.csv".into()).resolve(&state, &window()).unwrap(),
            Resolved::Export(PathBuf::from("out.csv"))
        );
    }
}
