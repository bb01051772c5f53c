use super::types::Command;

pub fn parse_command(input: &str) -> Option<Command> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let mut parts = trimmed.splitn(2, char::is_whitespace);
    let cmd = parts.next()?.to_lowercase();
    let args = parts.next().unwrap_or("").trim();

    match cmd.as_str() {
        "/game" | "/play" => Some(Command::Game),
        "/context" => Some(Command::Context),
        "/username" | "/name" => Some(Command::Username {
            name: if args.is_empty() {
                None
            } else {
                Some(args.to_string())
            },
        }),
        "/help" | "/?" => Some(Command::Help),
        "/quit" | "/exit" => Some(Command::Quit),
        _ => None,
    }
}
