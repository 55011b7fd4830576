use sales_repo::month::{Month, ParseMonthError};
use thiserror::Error;

pub const DEFAULT_PER_PAGE: u32 = 10;

/// What the user has selected. The table is the only view that depends on
/// `search` and `page`.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct DashboardState {
    pub month: Month,
    pub search: String,
    pub page: u32,
    pub per_page: u32,
}

impl DashboardState {
    pub fn new(month: Month, search: String, per_page: u32) -> DashboardState {
        DashboardState {
            month,
            search,
            page: 1,
            per_page: per_page.max(1),
        }
    }

    /// Applies `command` and reports which views have to be fetched again.
    pub fn apply(&mut self, command: Command) -> Effect {
        match command {
            Command::Month(month) => {
                if month == self.month {
                    return Effect::None;
                }
                self.month = month;
                self.page = 1;
                Effect::RefreshAll
            }
            Command::Search(search) => {
                if search == self.search {
                    return Effect::None;
                }
                self.search = search;
                self.page = 1;
                Effect::RefreshTable
            }
            Command::NextPage => {
                self.page += 1;
                Effect::RefreshTable
            }
            Command::PreviousPage => {
                if self.page == 1 {
                    return Effect::None;
                }
                self.page -= 1;
                Effect::RefreshTable
            }
            Command::Refresh => Effect::RefreshAll,
            Command::Help => Effect::Help,
            Command::Quit => Effect::Quit,
        }
    }
}

impl Default for DashboardState {
    fn default() -> Self {
        DashboardState::new(Month::MARCH, String::new(), DEFAULT_PER_PAGE)
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Command {
    Month(Month),
    Search(String),
    NextPage,
    PreviousPage,
    Refresh,
    Help,
    Quit,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Effect {
    None,
    RefreshAll,
    RefreshTable,
    Help,
    Quit,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command {0:?}, type `help` for a list of commands")]
    Unknown(String),
    #[error("`month` needs a month number or name")]
    MissingMonth,
    #[error(transparent)]
    InvalidMonth(#[from] ParseMonthError),
}

impl Command {
    pub fn parse(line: &str) -> Result<Command, CommandError> {
        let line = line.trim();
        let (name, argument) = match line.split_once(char::is_whitespace) {
            Some((name, argument)) => (name, argument.trim()),
            None => (line, ""),
        };

        match name.to_lowercase().as_str() {
            "month" | "m" => {
                if argument.is_empty() {
                    return Err(CommandError::MissingMonth);
                }
                Ok(Command::Month(argument.parse()?))
            }
            "search" | "s" => Ok(Command::Search(argument.to_owned())),
            "next" | "n" => Ok(Command::NextPage),
            "prev" | "p" => Ok(Command::PreviousPage),
            "refresh" | "r" | "" => Ok(Command::Refresh),
            "help" | "h" | "?" => Ok(Command::Help),
            "quit" | "q" | "exit" => Ok(Command::Quit),
            _ => Err(CommandError::Unknown(name.to_owned())),
        }
    }
}

pub const HELP: &str = "\
Commands:
  month <1-12|name>  show another month
  search <text>      filter the table, empty text clears the filter
  next, prev         move through table pages
  refresh            fetch every view again
  help               show this message
  quit               exit";

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("month 4", Command::Month(Month::new(4).unwrap()))]
    #[case("month dec", Command::Month(Month::DECEMBER))]
    #[case("  MONTH   January ", Command::Month(Month::JANUARY))]
    #[case("search gold ring", Command::Search("gold ring".to_string()))]
    #[case("search", Command::Search(String::new()))]
    #[case("next", Command::NextPage)]
    #[case("p", Command::PreviousPage)]
    #[case("", Command::Refresh)]
    #[case("q", Command::Quit)]
    fn parse_commands(#[case] line: &str, #[case] expected: Command) {
        assert_eq!(Command::parse(line), Ok(expected));
    }

    #[rstest]
    #[case("month", CommandError::MissingMonth)]
    #[case("month 13", CommandError::InvalidMonth(ParseMonthError("13".to_string())))]
    #[case("jump 3", CommandError::Unknown("jump".to_string()))]
    fn parse_invalid_commands(#[case] line: &str, #[case] expected: CommandError) {
        assert_eq!(Command::parse(line), Err(expected));
    }

    #[test]
    fn month_change_refreshes_everything_and_resets_page() {
        let mut state = DashboardState::default();
        state.page = 3;

        let effect = state.apply(Command::Month(Month::DECEMBER));

        assert_eq!(effect, Effect::RefreshAll);
        assert_eq!(state.month, Month::DECEMBER);
        assert_eq!(state.page, 1);
    }

    #[test]
    fn search_change_refreshes_only_table() {
        let mut state = DashboardState::default();
        state.page = 2;

        let effect = state.apply(Command::Search("bag".to_string()));

        assert_eq!(effect, Effect::RefreshTable);
        assert_eq!(state.search, "bag");
        assert_eq!(state.page, 1);
        assert_eq!(state.month, Month::MARCH);
    }

    #[test]
    fn unchanged_selection_fetches_nothing() {
        let mut state = DashboardState::default();
        assert_eq!(state.apply(Command::Month(Month::MARCH)), Effect::None);
        assert_eq!(state.apply(Command::Search(String::new())), Effect::None);
    }

    #[test]
    fn paging() {
        let mut state = DashboardState::default();
        assert_eq!(state.apply(Command::PreviousPage), Effect::None);
        assert_eq!(state.page, 1);

        assert_eq!(state.apply(Command::NextPage), Effect::RefreshTable);
        assert_eq!(state.apply(Command::NextPage), Effect::RefreshTable);
        assert_eq!(state.page, 3);

        assert_eq!(state.apply(Command::PreviousPage), Effect::RefreshTable);
        assert_eq!(state.page, 2);
    }
}
