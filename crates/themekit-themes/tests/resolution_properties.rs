use proptest::prelude::*;
use themekit_themes::{NamedPalette, Palette, ThemeError, ThemeMode, ThemeRegistry};

fn palette(bg: &str) -> Palette {
    Palette::new().with("backgroundColor", bg)
}

fn base_registry() -> ThemeRegistry {
    ThemeRegistry::new(palette("black"), palette("white"))
}

fn arb_name() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z0-9_-]{0,15}"
}

fn arb_color() -> impl Strategy<Value = String> {
    "#[0-9a-f]{6}"
}

proptest! {
    #[test]
    fn prop_unregistered_names_are_not_found(name in arb_name(), dark in any::<bool>()) {
        prop_assume!(ThemeMode::from_name(&name).is_none());

        let err = base_registry().resolve(&name, dark).unwrap_err();
        prop_assert!(matches!(err, ThemeError::NotFound(ref missing) if *missing == name));
    }

    #[test]
    fn prop_system_follows_appearance(dark in any::<bool>()) {
        let registry = base_registry();
        let resolved = registry.resolve("system", dark).unwrap();
        let expected = if dark { registry.dark() } else { registry.light() };
        prop_assert_eq!(&resolved, expected);
    }

    #[test]
    fn prop_registered_custom_resolves_to_its_palette(
        name in arb_name(),
        color in arb_color(),
        dark in any::<bool>(),
    ) {
        let registry = base_registry()
            .with_custom_list(vec![NamedPalette::new(name.clone(), palette(&color))]);

        let resolved = registry.resolve(&name, dark).unwrap();
        prop_assert_eq!(resolved.background_color(), Some(color.as_str()));
    }

    #[test]
    fn prop_first_duplicate_wins(
        name in arb_name(),
        first in arb_color(),
        second in arb_color(),
    ) {
        let registry = base_registry().with_custom_list(vec![
            NamedPalette::new(name.clone(), palette(&first)),
            NamedPalette::new(name.clone(), palette(&second)),
        ]);

        let resolved = registry.resolve(&name, false).unwrap();
        prop_assert_eq!(resolved.background_color(), Some(first.as_str()));
    }

    #[test]
    fn prop_resolution_is_deterministic(name in arb_name(), dark in any::<bool>()) {
        let registry = base_registry()
            .with_custom_list(vec![NamedPalette::new("ocean", palette("#006994"))]);

        let first = registry.resolve(&name, dark).ok();
        let second = registry.resolve(&name, dark).ok();
        prop_assert_eq!(first, second);
    }
}
