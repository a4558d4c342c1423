//! Header-to-field resolution for the inventory sheet
//!
//! The sheet is maintained by hand and the column order changes whenever
//! someone reshuffles it, so columns are located by keyword instead of by
//! position. Each semantic field carries a curated list of header synonyms;
//! the first header (left to right) containing any synonym as a substring
//! wins. Header order deliberately beats keyword specificity — the lists
//! are mutually exclusive in practice, and a deterministic scan is easier
//! to reason about than a scoring scheme.

/// Semantic fields a sheet column can map to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// Item name ("Modelo", "Equipo", ...)
    Name,
    /// Unit price in USD
    Price,
    /// Battery health percentage
    Battery,
    /// Physical condition ("Impecable", ...)
    Condition,
    /// Availability ("Disponible" / "Vendido")
    Status,
    Color,
    /// Free-text notes
    Notes,
    /// Storage capacity in GB
    Storage,
}

/// Keyword table, evaluated in declaration order. Keywords are matched as
/// substrings against case-folded headers.
const FIELD_KEYWORDS: &[(Field, &[&str])] = &[
    (Field::Name, &["modelo", "equipo", "nombre", "producto"]),
    (Field::Price, &["precio", "valor", "usd", "precio usd"]),
    (Field::Battery, &["bateria", "batería", "bat", "%"]),
    (Field::Condition, &["condicion", "condición"]),
    (Field::Status, &["estado", "disponibilidad", "status"]),
    (Field::Color, &["color"]),
    (Field::Notes, &["detalle", "detalles", "obs", "notas"]),
    (Field::Storage, &["capacidad", "memoria", "gb", "almacenamiento"]),
];

/// Resolved column positions for one sheet. `None` means no header matched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMap {
    pub name: Option<usize>,
    pub price: Option<usize>,
    pub battery: Option<usize>,
    pub condition: Option<usize>,
    pub status: Option<usize>,
    pub color: Option<usize>,
    pub notes: Option<usize>,
    pub storage: Option<usize>,
}

impl ColumnMap {
    /// Resolve the header row into column positions.
    ///
    /// Headers are case-folded before matching. For each field the scan
    /// returns the position of the first header containing any of that
    /// field's keywords.
    pub fn resolve(headers: &[String]) -> Self {
        let folded: Vec<String> = headers.iter().map(|h| h.to_lowercase()).collect();

        let find = |field: Field| -> Option<usize> {
            let (_, keywords) = FIELD_KEYWORDS.iter().find(|(f, _)| *f == field)?;
            folded
                .iter()
                .position(|h| keywords.iter().any(|k| h.contains(k)))
        };

        Self {
            name: find(Field::Name),
            price: find(Field::Price),
            battery: find(Field::Battery),
            condition: find(Field::Condition),
            status: find(Field::Status),
            color: find(Field::Color),
            notes: find(Field::Notes),
            storage: find(Field::Storage),
        }
    }

    /// Fetch a cell by resolved position, empty string when the column is
    /// unresolved or the row is short.
    pub fn cell<'a>(&self, row: &'a [String], position: Option<usize>) -> &'a str {
        position
            .and_then(|idx| row.get(idx))
            .map(|s| s.as_str())
            .unwrap_or("")
    }
}
