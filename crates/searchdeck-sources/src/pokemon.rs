//! PokeAPI lookup by name.

use serde::Deserialize;

use crate::config::SourceConfig;
use crate::error::SourceError;
use crate::http::HttpClient;
use crate::SearchSource;

/// A named API resource reference.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Named {
    /// Resource name.
    pub name: String,
}

/// An ability slot.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AbilitySlot {
    /// The ability.
    pub ability: Named,
    /// Whether this is a hidden ability.
    #[serde(default)]
    pub is_hidden: bool,
}

/// A type slot.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TypeSlot {
    /// Slot order.
    #[serde(default)]
    pub slot: u32,
    /// The type.
    #[serde(rename = "type")]
    pub kind: Named,
}

/// A base stat.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StatSlot {
    /// Base value.
    pub base_stat: u32,
    /// The stat.
    pub stat: Named,
}

/// A Pokémon.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Pokemon {
    /// National dex number.
    pub id: u32,
    /// Name.
    pub name: String,
    /// Height in decimetres.
    #[serde(default)]
    pub height: u32,
    /// Weight in hectograms.
    #[serde(default)]
    pub weight: u32,
    /// Abilities.
    #[serde(default)]
    pub abilities: Vec<AbilitySlot>,
    /// Types.
    #[serde(default)]
    pub types: Vec<TypeSlot>,
    /// Base stats.
    #[serde(default)]
    pub stats: Vec<StatSlot>,
}

/// Looks up a Pokémon by name or dex number.
#[derive(Debug, Clone)]
pub struct PokemonLookup {
    http: HttpClient,
    base: String,
}

impl PokemonLookup {
    /// Create the source.
    pub fn new(http: HttpClient, config: &SourceConfig) -> Self {
        Self {
            http,
            base: config.endpoints.pokeapi.clone(),
        }
    }
}

impl SearchSource for PokemonLookup {
    type Output = Pokemon;

    fn name(&self) -> &'static str {
        "pokemon"
    }

    fn search(&self, query: &str) -> Result<Pokemon, SourceError> {
        // PokeAPI names are lower-case.
        let name = query.trim().to_lowercase();
        let url = format!("{}/pokemon/{}", self.base, urlencoding::encode(&name));
        self.http
            .get_json(&url, &[], &format!("pokemon \"{name}\""))
    }
}
