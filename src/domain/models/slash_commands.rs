#[cfg(test)]
#[path = "slash_commands_test.rs"]
mod tests;

pub struct SlashCommand {
    command: String,
    pub args: Vec<String>,
}

impl SlashCommand {
    pub fn parse(text: &str) -> Option<SlashCommand> {
        let mut args = text
            .split_whitespace()
            .map(|e| return e.to_string())
            .collect::<Vec<String>>();
        if args.is_empty() {
            return None;
        }
        let prefix = args.remove(0);

        let cmd = SlashCommand {
            command: prefix,
            args,
        };
        if cmd.is_quit()
            || cmd.is_help()
            || cmd.is_clear()
            || cmd.is_persona()
            || cmd.is_temperature()
            || cmd.is_max_tokens()
            || cmd.is_timestamps()
            || cmd.is_dark_mode()
            || cmd.is_sidebar()
        {
            return Some(cmd);
        }

        return None;
    }

    pub fn first_arg(&self) -> Option<&str> {
        return self.args.first().map(|e| return e.as_str());
    }

    pub fn is_quit(&self) -> bool {
        return ["/q", "/quit", "/exit"].contains(&self.command.as_str());
    }

    pub fn is_help(&self) -> bool {
        return ["/h", "/help"].contains(&self.command.as_str());
    }

    pub fn is_clear(&self) -> bool {
        return ["/c", "/clear"].contains(&self.command.as_str());
    }

    pub fn is_persona(&self) -> bool {
        return ["/p", "/persona"].contains(&self.command.as_str());
    }

    pub fn is_temperature(&self) -> bool {
        return ["/t", "/temp", "/temperature"].contains(&self.command.as_str());
    }

    pub fn is_max_tokens(&self) -> bool {
        return ["/mt", "/maxtokens"].contains(&self.command.as_str());
    }

    pub fn is_timestamps(&self) -> bool {
        return ["/ts", "/timestamps"].contains(&self.command.as_str());
    }

    pub fn is_dark_mode(&self) -> bool {
        return ["/d", "/dark"].contains(&self.command.as_str());
    }

    pub fn is_sidebar(&self) -> bool {
        return ["/s", "/sidebar"].contains(&self.command.as_str());
    }
}
