#[cfg(test)]
mod tests {
    use std::path::Path;

    use crate::*;

    #[test]
    fn empty_file_uses_defaults() {
        let file = load_from_str("()", None).unwrap();
        assert_eq!(file.palette, PaletteConfig::default());
        assert!(file.commands.is_empty());
    }

    #[test]
    fn flat_commands_parse() {
        let ron = r#"(
            palette: (hotkey: "ctrl+p", max_results: 5),
            commands: Flat([
                (id: "save", label: "Save", keywords: ["write"], run: Some("true")),
                (id: "load", label: "Load", disabled: true),
            ]),
        )"#;
        let file = load_from_str(ron, None).unwrap();
        assert_eq!(file.palette.hotkey, "ctrl+p");
        assert_eq!(file.palette.max_results, 5);
        assert_eq!(file.palette.placeholder, "Type a command or search...");
        let RegistrySpec::Flat(cmds) = &file.commands else {
            panic!("expected flat registry");
        };
        assert_eq!(cmds.len(), 2);
        assert_eq!(cmds[0].keywords, vec!["write".to_string()]);
        assert_eq!(cmds[0].run.as_deref(), Some("true"));
        assert!(cmds[1].disabled);
    }

    #[test]
    fn grouped_commands_parse() {
        let ron = r#"(
            commands: Grouped([
                (id: "file", label: Some("File"), commands: [
                    (id: "open", label: "Open", shortcut: Some("cmd+o")),
                ]),
                (id: "view", commands: []),
            ]),
        )"#;
        let file = load_from_str(ron, None).unwrap();
        let RegistrySpec::Grouped(groups) = &file.commands else {
            panic!("expected grouped registry");
        };
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].label.as_deref(), Some("File"));
        assert_eq!(groups[0].commands[0].shortcut.as_deref(), Some("cmd+o"));
        assert_eq!(file.commands.len(), 1);
    }

    #[test]
    fn unknown_fields_are_parse_errors() {
        let err = load_from_str("(palette: (colour: \"red\"))", None).unwrap_err();
        assert!(matches!(err, Error::Parse { .. }), "{err:?}");
    }

    #[test]
    fn validation_errors() {
        let err = load_from_str("(palette: (max_results: 0))", None).unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));

        let err = load_from_str(r#"(commands: Flat([(id: "", label: "X")]))"#, None).unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
    }

    #[test]
    fn duplicate_ids_reported_not_rejected() {
        let ron = r#"(commands: Flat([
            (id: "a", label: "One"),
            (id: "a", label: "Two"),
            (id: "b", label: "Three"),
        ]))"#;
        let file = load_from_str(ron, None).unwrap();
        assert_eq!(file.commands.duplicate_ids(), vec!["a".to_string()]);
    }

    #[test]
    fn wrong_extension_rejected() {
        let err = load_from_path(Path::new("/nonexistent/palette.toml")).unwrap_err();
        assert!(matches!(err, Error::Read { .. }));
        assert_eq!(err.path(), Some(Path::new("/nonexistent/palette.toml")));
    }

    #[test]
    fn explicit_path_wins() {
        let p = Path::new("/somewhere/custom.ron");
        assert_eq!(resolve_config_path(Some(p)).unwrap(), p.to_path_buf());
    }
}
