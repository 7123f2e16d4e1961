use super::SlashCommand;

#[test]
fn it_parse_empty_string() {
    let text = "";
    assert!(SlashCommand::parse(text).is_none());
}

#[test]
fn it_parse_space_only() {
    let text = " ";
    assert!(SlashCommand::parse(text).is_none());
}

#[test]
fn it_parse_single_slash() {
    let text = "/";
    assert!(SlashCommand::parse(text).is_none());
}

#[test]
fn it_parse_invalid_prefix() {
    let text = "!q";
    assert!(SlashCommand::parse(text).is_none());
}

#[test]
fn it_parse_regular_message() {
    let text = "What is /q in vim?";
    assert!(SlashCommand::parse(text).is_none());
}

#[test]
fn it_parse_valid_prefix() {
    let text = "/q";
    let cmd = SlashCommand::parse(text);
    assert!(cmd.is_some());
    assert_eq!(cmd.unwrap().command, "/q");
}

#[test]
fn it_is_short_quit() {
    let cmd = SlashCommand::parse("/q").unwrap();
    assert!(cmd.is_quit());
}

#[test]
fn it_is_exit() {
    let cmd = SlashCommand::parse("/exit").unwrap();
    assert!(cmd.is_quit());
}

#[test]
fn it_is_help() {
    let cmd = SlashCommand::parse("/help").unwrap();
    assert!(cmd.is_help());
}

#[test]
fn it_is_clear() {
    let cmd = SlashCommand::parse("/clear").unwrap();
    assert!(cmd.is_clear());
    assert!(!cmd.is_quit());
}

#[test]
fn it_is_persona_with_arg() {
    let cmd = SlashCommand::parse("  /persona   tutor ").unwrap();
    assert!(cmd.is_persona());
    assert_eq!(cmd.first_arg(), Some("tutor"));
}

#[test]
fn it_is_persona_without_arg() {
    let cmd = SlashCommand::parse("/p").unwrap();
    assert!(cmd.is_persona());
    assert_eq!(cmd.first_arg(), None);
}

#[test]
fn it_is_temperature() {
    let cmd = SlashCommand::parse("/temp 0.4").unwrap();
    assert!(cmd.is_temperature());
    assert_eq!(cmd.args, vec!["0.4".to_string()]);
}

#[test]
fn it_is_max_tokens() {
    let cmd = SlashCommand::parse("/maxtokens 200").unwrap();
    assert!(cmd.is_max_tokens());
}

#[test]
fn it_is_toggles() {
    assert!(SlashCommand::parse("/ts").unwrap().is_timestamps());
    assert!(SlashCommand::parse("/dark").unwrap().is_dark_mode());
    assert!(SlashCommand::parse("/sidebar").unwrap().is_sidebar());
}
