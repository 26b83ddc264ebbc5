//! Facet selections: the filters and sort order a user has switched on.

use std::fmt;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

/// The dimension a facet selection applies to.
///
/// The set is closed, but selections arriving from outside may carry a
/// category this build doesn't know. Those are kept as `Unrecognized` so
/// that evaluation can ignore them instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FacetCategory {
    Activity,
    Location,
    Duration,
    GroupSize,
    Sort,
    Unrecognized(String),
}

impl FacetCategory {
    /// All recognised categories, in display order.
    pub const KNOWN: [FacetCategory; 5] = [
        FacetCategory::Activity,
        FacetCategory::Location,
        FacetCategory::Duration,
        FacetCategory::GroupSize,
        FacetCategory::Sort,
    ];

    /// Parse a category name. Unknown names become `Unrecognized`.
    pub fn parse(s: &str) -> Self {
        match s {
            "activity" => FacetCategory::Activity,
            "location" => FacetCategory::Location,
            "duration" => FacetCategory::Duration,
            "group_size" => FacetCategory::GroupSize,
            "sort" => FacetCategory::Sort,
            other => FacetCategory::Unrecognized(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            FacetCategory::Activity => "activity",
            FacetCategory::Location => "location",
            FacetCategory::Duration => "duration",
            FacetCategory::GroupSize => "group_size",
            FacetCategory::Sort => "sort",
            FacetCategory::Unrecognized(s) => s,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, FacetCategory::Unrecognized(_))
    }
}

impl From<String> for FacetCategory {
    fn from(s: String) -> Self {
        FacetCategory::parse(&s)
    }
}

impl From<FacetCategory> for String {
    fn from(c: FacetCategory) -> Self {
        c.as_str().to_string()
    }
}

impl fmt::Display for FacetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Heading shown for a category in the filter picker.
pub fn category_label(category: &FacetCategory) -> &'static str {
    match category {
        FacetCategory::Activity => "Actividad",
        FacetCategory::Location => "Destino",
        FacetCategory::Duration => "Duración",
        FacetCategory::GroupSize => "Tamaño del grupo",
        FacetCategory::Sort => "Ordenar por",
        FacetCategory::Unrecognized(_) => "Otros",
    }
}

/// One active filter or sort option.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FacetSelection {
    /// Option identifier, e.g. `skiing` or `price-low`.
    pub id: String,

    /// Text matched (case-insensitively) against trip fields.
    pub label: String,

    pub category: FacetCategory,
}

impl FacetSelection {
    pub fn new(id: impl Into<String>, label: impl Into<String>, category: FacetCategory) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            category,
        }
    }
}

static FACET_OPTIONS: LazyLock<Vec<FacetSelection>> = LazyLock::new(|| {
    use FacetCategory::*;
    [
        ("skiing", "Esquí", Activity),
        ("hiking", "Senderismo", Activity),
        ("sailing", "Navegación", Activity),
        ("cycling", "Ciclismo", Activity),
        ("lofoten", "Lofoten", Location),
        ("tromso", "Tromsø", Location),
        ("norway", "Noruega", Location),
        ("sweden", "Suecia", Location),
        ("3-5-days", "3-5 días", Duration),
        ("6-8-days", "6-8 días", Duration),
        ("9-14-days", "9-14 días", Duration),
        ("small-group", "Grupo pequeño (2-6)", GroupSize),
        ("medium-group", "Grupo mediano (7-12)", GroupSize),
        ("price-low", "Precio: menor a mayor", Sort),
        ("price-high", "Precio: mayor a menor", Sort),
        ("rating", "Mejor valorados", Sort),
        ("duration", "Duración", Sort),
    ]
    .into_iter()
    .map(|(id, label, category)| FacetSelection::new(id, label, category))
    .collect()
});

/// The options offered by the filter picker, grouped by category order.
pub fn facet_options() -> &'static [FacetSelection] {
    &FACET_OPTIONS
}

/// Look up an offered option by id.
pub fn facet_option(id: &str) -> Option<&'static FacetSelection> {
    FACET_OPTIONS.iter().find(|o| o.id == id)
}

/// The set of active selections, in the order they were switched on.
///
/// Holds at most one `Sort` selection: switching on a new sort replaces
/// the previous one. Every other category accumulates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FacetSet {
    active: Vec<FacetSelection>,
}

impl FacetSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch a selection on, or off if its id is already active.
    ///
    /// Returns `true` if the selection is active afterwards.
    pub fn toggle(&mut self, selection: FacetSelection) -> bool {
        if let Some(pos) = self.active.iter().position(|f| f.id == selection.id) {
            self.active.remove(pos);
            return false;
        }
        if selection.category == FacetCategory::Sort {
            self.active.retain(|f| f.category != FacetCategory::Sort);
        }
        self.active.push(selection);
        true
    }

    /// Remove every selection in `category`. Returns how many were removed.
    pub fn clear_category(&mut self, category: &FacetCategory) -> usize {
        let before = self.active.len();
        self.active.retain(|f| &f.category != category);
        before - self.active.len()
    }

    pub fn clear_all(&mut self) {
        self.active.clear();
    }

    pub fn contains(&self, id: &str) -> bool {
        self.active.iter().any(|f| f.id == id)
    }

    /// The active sort selection, if any.
    pub fn sort(&self) -> Option<&FacetSelection> {
        self.active
            .iter()
            .find(|f| f.category == FacetCategory::Sort)
    }

    /// Active selections in one category.
    pub fn in_category<'a>(
        &'a self,
        category: &'a FacetCategory,
    ) -> impl Iterator<Item = &'a FacetSelection> + 'a {
        self.active.iter().filter(move |f| &f.category == category)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FacetSelection> {
        self.active.iter()
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

impl FromIterator<FacetSelection> for FacetSet {
    /// Builds the set by toggling each selection in turn.
    fn from_iter<I: IntoIterator<Item = FacetSelection>>(iter: I) -> Self {
        let mut set = FacetSet::new();
        for selection in iter {
            set.toggle(selection);
        }
        set
    }
}
