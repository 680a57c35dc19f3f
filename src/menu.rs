use crate::commands::registry::Registry;

/// Separator between identifier and description in a menu label
pub const LABEL_SEPARATOR: &str = " - ";

/// A menu line together with the identifier it stands for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub id: String,
    pub label: String,
}

/// First non-empty line of a description.
#[must_use]
pub fn first_line(description: &str) -> Option<&str> {
    description
        .trim()
        .lines()
        .next()
        .map(str::trim)
        .filter(|line| !line.is_empty())
}

/// `"<id> - <first line>"`, or just `"<id>"` without a description.
#[must_use]
pub fn build_label(id: &str, description: Option<&str>) -> String {
    match description.and_then(first_line) {
        Some(line) => format!("{id}{LABEL_SEPARATOR}{line}"),
        None => id.to_string(),
    }
}

/// Recover the identifier from a label built by [`build_label`].
#[must_use]
pub fn identifier_from_label(label: &str) -> &str {
    label
        .split_once(LABEL_SEPARATOR)
        .map_or(label, |(id, _)| id)
}

/// Discover every command and describe it, in menu order.
pub fn build_menu(registry: &mut Registry) -> Vec<MenuEntry> {
    registry
        .discover()
        .into_iter()
        .map(|id| {
            let description = registry.describe(&id);
            MenuEntry {
                label: build_label(&id, description.as_deref()),
                id,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_uses_first_line() {
        assert_eq!(
            build_label("backup", Some("Back up files.\nDetails...")),
            "backup - Back up files."
        );
        assert_eq!(
            build_label("backup", Some("\n  Back up files.  \n")),
            "backup - Back up files."
        );
    }

    #[test]
    fn test_label_without_description() {
        assert_eq!(build_label("clean", None), "clean");
        assert_eq!(build_label("clean", Some("   ")), "clean");
    }

    #[test]
    fn test_parse_is_left_inverse_of_build() {
        let cases = [
            ("backup", Some("Back up files.")),
            ("deploy-prod", Some("Deploy - carefully")),
            ("x", None),
            ("with space", Some("a - b - c")),
        ];
        for (id, description) in cases {
            let label = build_label(id, description);
            assert_eq!(identifier_from_label(&label), id, "label: {label}");
        }
    }

    #[test]
    fn test_build_menu() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("backup.sh"),
            "#!/bin/sh\n# Back up files.\n# Details...\n",
        )
        .unwrap();
        std::fs::write(dir.path().join("clean.sh"), "#!/bin/sh\nrm -rf build\n").unwrap();
        let mut registry =
            Registry::new(&crate::config_file::Settings::with_commands_dir(dir.path()));

        let menu = build_menu(&mut registry);
        let labels: Vec<&str> = menu.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["backup - Back up files.", "clean"]);
        assert_eq!(menu[0].id, "backup");
    }
}
