use crate::catalog::Catalog;
use crate::entry::CatalogEntry;

/// Built-in grocery price table (pesos), used when no catalog file is given.
const ALMACEN: &[(&str, u64)] = &[
    ("manzana", 150),
    ("pera", 180),
    ("banana", 120),
    ("naranja", 100),
    ("limón", 200),
    ("mandarina", 80),
    ("kiwi", 250),
    ("durazno", 220),
    ("pan", 50),
    ("leche", 120),
    ("azúcar", 90),
    ("harina", 80),
    ("arroz", 110),
    ("fideos", 85),
    ("galletas", 75),
    ("yogur", 65),
    ("papa", 70),
    ("cebolla", 60),
    ("tomate", 90),
    ("zanahoria", 55),
    ("huevo", 15),
    ("queso", 200),
    ("jamon", 180),
    ("cafe", 220),
];

impl Catalog {
    /// The default corner-shop catalog.
    pub fn default_almacen() -> Self {
        ALMACEN
            .iter()
            .filter_map(|(name, price)| CatalogEntry::new(*name, *price).ok())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxledger_core::Money;

    #[test]
    fn default_catalog_is_complete_and_ordered() {
        let c = Catalog::default_almacen();
        assert_eq!(c.len(), ALMACEN.len());
        assert_eq!(c.entries()[0].name(), "manzana");
        assert_eq!(c.entries()[23].name(), "cafe");
    }

    #[test]
    fn accented_defaults_match_plain_spelling() {
        let c = Catalog::default_almacen();
        assert_eq!(c.lookup("azucar").unwrap().entry.unit_price(), Money::new(90));
        assert_eq!(c.lookup("limones").unwrap().entry.unit_price(), Money::new(200));
    }
}
