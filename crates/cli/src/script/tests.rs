use super::*;

fn parse(line: &str) -> ScriptCommand {
	ScriptCommand::parse(line).unwrap().unwrap()
}

#[test]
fn skips_blank_lines_and_comments() {
	assert_eq!(ScriptCommand::parse("").unwrap(), None);
	assert_eq!(ScriptCommand::parse("   ").unwrap(), None);
	assert_eq!(ScriptCommand::parse("# push").unwrap(), None);
}

#[test]
fn parses_marker_commands_and_their_names() {
	assert_eq!(parse("push"), ScriptCommand::Marker(MarkerCommand::Push));
	assert_eq!(parse("pop"), ScriptCommand::Marker(MarkerCommand::Pop));
	assert_eq!(parse("marker_stack_push"), ScriptCommand::Marker(MarkerCommand::Push));
	assert_eq!(parse("marker_stack_pop"), ScriptCommand::Marker(MarkerCommand::Pop));
}

#[test]
fn unknown_command_is_an_error() {
	let err = ScriptCommand::parse("jump").unwrap_err();
	assert!(err.to_string().contains("jump"));
}

#[test]
fn goto_is_one_based() {
	assert_eq!(parse("goto 10 1"), ScriptCommand::Goto(LineCol::new(9, 0)));
	assert_eq!(parse("goto 3"), ScriptCommand::Goto(LineCol::new(2, 0)));
	assert!(ScriptCommand::parse("goto 0 1").is_err());
	assert!(ScriptCommand::parse("goto").is_err());
	assert!(ScriptCommand::parse("goto x").is_err());
}

#[test]
fn scroll_takes_one_or_two_offsets() {
	assert_eq!(parse("scroll 400"), ScriptCommand::Scroll(ViewportState::new(0.0, 400.0)));
	assert_eq!(parse("scroll 12.5 400"), ScriptCommand::Scroll(ViewportState::new(12.5, 400.0)));
	assert!(ScriptCommand::parse("scroll").is_err());
	assert!(ScriptCommand::parse("scroll 1 2 3").is_err());
	assert!(ScriptCommand::parse("scroll NaN").is_err());
}

#[test]
fn insert_unescapes_and_keeps_trailing_space() {
	assert_eq!(parse("insert a\\nb "), ScriptCommand::Insert("a\nb ".into()));
	assert_eq!(parse("insert \\t\\\\x\\q"), ScriptCommand::Insert("\t\\x\\q".into()));
	assert_eq!(parse("insert"), ScriptCommand::Insert(String::new()));
}

#[test]
fn delete_requires_a_count() {
	assert_eq!(parse("delete 5"), ScriptCommand::Delete(5));
	assert!(ScriptCommand::parse("delete").is_err());
	assert!(ScriptCommand::parse("delete -1").is_err());
}

#[test]
fn focus_by_index_or_path() {
	assert_eq!(parse("focus #2"), ScriptCommand::Focus(DocumentTarget::Index(2)));
	assert_eq!(parse("focus 2"), ScriptCommand::Focus(DocumentTarget::Path("2".into())));
	assert_eq!(
		parse("focus src/lib.rs"),
		ScriptCommand::Focus(DocumentTarget::Path("src/lib.rs".into()))
	);
}

#[test]
fn open_requires_a_path() {
	assert_eq!(parse("open notes.md"), ScriptCommand::Open("notes.md".into()));
	assert!(ScriptCommand::parse("open").is_err());
}
