use crossterm::event::KeyCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiCommand {
    Refresh,
    ToggleSortOrder,
    ToggleSidebarFilter,
    OpenCoinSelector,
    SidebarUp,
    SidebarDown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorCommand {
    CursorUp,
    CursorDown,
    ToggleCoin,
    Confirm,
    Cancel,
}

pub fn parse_main_command(key_code: &KeyCode) -> Option<UiCommand> {
    match key_code {
        KeyCode::Up => Some(UiCommand::SidebarUp),
        KeyCode::Down => Some(UiCommand::SidebarDown),
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'r' => Some(UiCommand::Refresh),
            's' => Some(UiCommand::ToggleSortOrder),
            'a' => Some(UiCommand::ToggleSidebarFilter),
            'c' => Some(UiCommand::OpenCoinSelector),
            'k' => Some(UiCommand::SidebarUp),
            'j' => Some(UiCommand::SidebarDown),
            _ => None,
        },
        _ => None,
    }
}

pub fn parse_selector_command(key_code: &KeyCode) -> Option<SelectorCommand> {
    match key_code {
        KeyCode::Up => Some(SelectorCommand::CursorUp),
        KeyCode::Down => Some(SelectorCommand::CursorDown),
        KeyCode::Char(' ') => Some(SelectorCommand::ToggleCoin),
        KeyCode::Enter => Some(SelectorCommand::Confirm),
        KeyCode::Esc => Some(SelectorCommand::Cancel),
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'k' => Some(SelectorCommand::CursorUp),
            'j' => Some(SelectorCommand::CursorDown),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn main_commands_are_case_insensitive() {
        assert_eq!(
            parse_main_command(&KeyCode::Char('R')),
            Some(UiCommand::Refresh)
        );
        assert_eq!(
            parse_main_command(&KeyCode::Char('s')),
            Some(UiCommand::ToggleSortOrder)
        );
        assert_eq!(parse_main_command(&KeyCode::Char('z')), None);
    }

    #[test]
    fn selector_space_toggles_and_enter_confirms() {
        assert_eq!(
            parse_selector_command(&KeyCode::Char(' ')),
            Some(SelectorCommand::ToggleCoin)
        );
        assert_eq!(
            parse_selector_command(&KeyCode::Enter),
            Some(SelectorCommand::Confirm)
        );
        assert_eq!(
            parse_selector_command(&KeyCode::Esc),
            Some(SelectorCommand::Cancel)
        );
    }
}
