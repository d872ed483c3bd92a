//! Built-in card catalog.

use crate::core::types::{CardType, Element};
use crate::effects::EffectKind;

use super::definition::CardTemplate;
use super::registry::CardCatalog;

const DEFAULT_CARDS: &str = include_str!("../../config/cards.toml");

/// The catalog shipped with the crate (`config/cards.toml`).
///
/// Falls back to a single-card catalog if the bundled file fails to load.
#[must_use]
pub fn default_catalog() -> CardCatalog {
    CardCatalog::from_toml_str(DEFAULT_CARDS).unwrap_or_else(|err| {
        tracing::error!(%err, "bundled card catalog failed to load");
        let mut catalog = CardCatalog::new();
        let bash = CardTemplate::new("bash", "Bash", CardType::Attack, Element::Normal, EffectKind::Damage)
            .with_power(10)
            .with_accuracy(90);
        if let Err(err) = catalog.register(bash) {
            tracing::error!(%err, "fallback card rejected");
        }
        catalog
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::ActivationCount;

    #[test]
    fn test_bundled_catalog_loads() {
        let catalog = CardCatalog::from_toml_str(DEFAULT_CARDS).unwrap();
        assert!(catalog.len() >= 20);

        // Every type and element is represented
        for card_type in CardType::ALL {
            assert!(catalog.find_by_type(card_type).count() > 0, "no {card_type} cards");
        }
        for element in Element::ALL {
            assert!(catalog.iter().any(|c| c.element == element), "no {element} cards");
        }
    }

    #[test]
    fn test_bundled_flags() {
        let catalog = default_catalog();
        assert!(catalog.get("wild_swing").unwrap().random_bash);
        assert!(catalog.get("fortress").unwrap().skip_turn);
        assert_eq!(catalog.get("thunder_bolt").unwrap().stun_chance, 20);
        assert_eq!(
            catalog.get("flurry").unwrap().activation,
            ActivationCount::Random { min: 2, max: 4 }
        );
    }
}
