//! Help listings: permission filtering, shallow vs deep, sections.

use cmdtree::{CommandDescriptor, DispatchError, Dispatcher, Principal};

struct Player(&'static [&'static str]);

impl Principal for Player {
    fn name(&self) -> &str {
        "alex"
    }
    fn has_permission(&self, permission: &str) -> bool {
        self.0.contains(&permission)
    }
    fn send_message(&self, _message: &str) {}
}

const EVERYTHING: Player = Player(&["economy.pay", "cmd.admin", "tp.admin"]);
const NOTHING: Player = Player(&[]);

fn leaf(label: &str, description: &str) -> CommandDescriptor {
    CommandDescriptor::new(label)
        .description(description)
        .handler(|_, _| Ok(()))
}

fn dispatcher() -> Dispatcher {
    let mut dispatcher = Dispatcher::new("/cmd");
    let report = dispatcher.register_all(
        None,
        vec![
            CommandDescriptor::new("economy")
                .section("Economy")
                .child(
                    leaf("pay", "Send coins")
                        .usage("<player> <amount>")
                        .permission("economy.pay")
                        .section("Economy"),
                )
                .child(leaf("balance", "Show balance").section("Economy")),
            CommandDescriptor::new("admin")
                .permission("cmd.admin")
                .child(leaf("reload", "Reload config")),
            leaf("tp", "Teleport")
                .usage("[player]")
                .force_execute()
                .child(leaf("here", "Bring a player").usage("<player>").permission("tp.admin")),
            leaf("version", "Show version"),
        ],
    );
    assert!(report.is_clean(), "skipped: {:?}", report.skipped);
    dispatcher
}

// ============================================
// Shallow listings
// ============================================

mod shallow {
    use super::*;

    #[test]
    fn root_lists_permitted_children() {
        let listing = dispatcher().help_for::<&str>(&[], &NOTHING, false).expect("help");
        assert_eq!(
            listing.commands(),
            vec!["/cmd tp", "/cmd version", "/cmd economy"]
        );
        // `pay` needs economy.pay, so only `balance` is named
        assert_eq!(
            listing.section("Economy")[0].render(),
            "/cmd economy <balance>"
        );
    }

    #[test]
    fn root_with_permissions_includes_guarded_groups() {
        let listing = dispatcher()
            .help_for::<&str>(&[], &EVERYTHING, false)
            .expect("help");
        assert_eq!(
            listing.commands(),
            vec!["/cmd admin", "/cmd tp", "/cmd version", "/cmd economy"]
        );
    }

    #[test]
    fn group_path_lists_its_children() {
        let d = dispatcher();
        let listing = d.help_for(&["economy"], &NOTHING, false).expect("help");
        assert_eq!(listing.commands(), vec!["/cmd economy balance"]);

        let listing = d.help_for(&["economy"], &EVERYTHING, false).expect("help");
        assert_eq!(
            listing.rendered()["Economy"],
            vec![
                "/cmd economy balance - Show balance".to_string(),
                "/cmd economy pay <player> <amount> - Send coins".to_string(),
            ]
        );
    }

    #[test]
    fn force_executable_node_lists_itself() {
        let d = dispatcher();
        let listing = d.help_for(&["tp"], &EVERYTHING, false).expect("help");
        assert_eq!(
            listing.section("").iter().map(|e| e.render()).collect::<Vec<_>>(),
            vec![
                "/cmd tp [player] - Teleport".to_string(),
                "/cmd tp here <player> - Bring a player".to_string(),
            ]
        );

        let listing = d.help_for(&["TP"], &NOTHING, false).expect("help");
        assert_eq!(listing.commands(), vec!["/cmd tp"]);
    }
}

// ============================================
// Groups with guarded children
// ============================================

mod guarded_groups {
    use super::*;

    const OPERATOR: Player = Player(&["root"]);

    fn vault() -> Dispatcher {
        let mut dispatcher = Dispatcher::new("/cmd");
        let report = dispatcher.register_all(
            None,
            vec![
                CommandDescriptor::new("vault")
                    .child(leaf("wipe", "Erase everything").permission("root"))
                    .child(leaf("ping", "Check the vault")),
                CommandDescriptor::new("locked")
                    .child(leaf("purge", "Drop all data").permission("root")),
                CommandDescriptor::new("hinted")
                    .usage("<subcommand>")
                    .child(leaf("reset", "Reset state").permission("root")),
            ],
        );
        assert!(report.is_clean(), "skipped: {:?}", report.skipped);
        dispatcher
    }

    #[test]
    fn group_usage_names_only_permitted_children() {
        let d = vault();
        let listing = d.help_for::<&str>(&[], &NOTHING, false).expect("help");
        assert_eq!(listing.rendered()[""], vec!["/cmd vault <ping>".to_string()]);

        let listing = d.help_for::<&str>(&[], &OPERATOR, false).expect("help");
        assert_eq!(
            listing.rendered()[""],
            vec![
                "/cmd hinted <subcommand>".to_string(),
                "/cmd locked <purge>".to_string(),
                "/cmd vault <ping|wipe>".to_string(),
            ]
        );
    }

    #[test]
    fn shallow_and_deep_agree_on_hidden_children() {
        let d = vault();
        for deep in [false, true] {
            let listing = d.help_for::<&str>(&[], &NOTHING, deep).expect("help");
            let text = listing.rendered()[""].join("\n");
            assert!(!text.contains("wipe"), "deep={deep}: {text}");
            assert!(!text.contains("purge"), "deep={deep}: {text}");
            assert!(!text.contains("locked"), "deep={deep}: {text}");
            assert!(!text.contains("hinted"), "deep={deep}: {text}");
        }
        assert_eq!(
            d.help_for::<&str>(&[], &NOTHING, true).expect("help").commands(),
            vec!["/cmd vault ping"]
        );
    }
}

// ============================================
// Deep listings
// ============================================

mod deep {
    use super::*;

    #[test]
    fn deep_listing_skips_groups_and_forbidden_subtrees() {
        let listing = dispatcher().help_for::<&str>(&[], &NOTHING, true).expect("help");
        assert_eq!(
            listing.commands(),
            vec!["/cmd tp", "/cmd version", "/cmd economy balance"]
        );
    }

    #[test]
    fn deep_listing_with_all_permissions() {
        let listing = dispatcher()
            .help_for::<&str>(&[], &EVERYTHING, true)
            .expect("help");
        assert_eq!(
            listing.commands(),
            vec![
                "/cmd admin reload",
                "/cmd tp",
                "/cmd tp here",
                "/cmd version",
                "/cmd economy balance",
                "/cmd economy pay",
            ]
        );
        assert_eq!(listing.len(), 6);
    }
}

// ============================================
// Paths
// ============================================

mod paths {
    use super::*;

    #[test]
    fn forbidden_path_yields_empty_listing() {
        let listing = dispatcher().help_for(&["admin"], &NOTHING, true).expect("help");
        assert!(listing.is_empty());
    }

    #[test]
    fn unknown_path_token_is_an_error() {
        let d = dispatcher();
        match d.help_for(&["economy", "withdraw"], &EVERYTHING, false) {
            Err(DispatchError::UnknownArgument { label, usage, .. }) => {
                assert_eq!(label, "withdraw");
                assert_eq!(usage, "/cmd economy <balance|pay>");
            }
            other => panic!("unexpected result: {other:?}"),
        }
        let err = d.help_for(&["nope"], &EVERYTHING, false).unwrap_err();
        assert_eq!(err.usage(), Some("/cmd help"));
    }
}
