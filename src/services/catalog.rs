// src/services/catalog.rs
use crate::message::Product;

/// Most cards the widget shows for one turn.
pub const MAX_RESULTS: usize = 5;

#[derive(Debug, Clone)]
pub struct CatalogItem {
    pub name: &'static str,
    pub price: f64,
    pub link: &'static str,
    pub image: &'static str,
    pub keywords: &'static [&'static str],
}

impl CatalogItem {
    fn matches(&self, query: &ProductQuery) -> bool {
        let keyword_match = query
            .keywords
            .iter()
            .all(|wanted| self.keywords.iter().any(|kw| kw.contains(wanted.as_str())));
        let price_match = query.max_price.is_none_or(|max| self.price <= max);
        keyword_match && price_match
    }

    fn to_product(&self) -> Product {
        Product {
            name: self.name.to_string(),
            price: self.price,
            image: self.image.to_string(),
            link: self.link.to_string(),
        }
    }
}

/// What to look for. Every keyword must match one of an item's keywords.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductQuery {
    pub keywords: Vec<String>,
    pub max_price: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<CatalogItem>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalog {
    pub fn new(items: Vec<CatalogItem>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Matching products in catalog order, capped at [`MAX_RESULTS`].
    pub fn search(&self, query: &ProductQuery) -> Vec<Product> {
        self.items
            .iter()
            .filter(|item| item.matches(query))
            .take(MAX_RESULTS)
            .map(CatalogItem::to_product)
            .collect()
    }

    pub fn builtin() -> Self {
        Self::new(builtin_items())
    }
}

macro_rules! item {
    ($id:literal, $name:literal, $price:literal, $color:literal, $tag:literal, [$($kw:literal),+]) => {
        CatalogItem {
            name: $name,
            price: $price,
            link: concat!("/product/", $id),
            image: concat!("https://via.placeholder.com/150/", $color, "?text=", $tag),
            keywords: &[$($kw),+],
        }
    };
}

fn builtin_items() -> Vec<CatalogItem> {
    vec![
        item!(101, "SMK Stellar Full Face (DOT/ECE)", 4900.0, "e74c3c", "SMK", ["helmet", "full face", "smk"]),
        item!(102, "MT Thunder 4 Modular (ECE 22.06)", 7500.0, "3498db", "MT", ["helmet", "modular", "mt"]),
        item!(103, "Axor Apex Carbon (DOT/ECE)", 9800.0, "2c3e50", "Axor", ["helmet", "full face", "axor", "carbon"]),
        item!(104, "SMK Typhoon Flip-Up (ISI)", 6100.0, "1abc9c", "SMK", ["helmet", "modular", "smk"]),
        item!(105, "MT Hummer Open Face (ISI)", 2999.0, "f39c12", "MT", ["helmet", "open face", "mt"]),
        item!(106, "Axor Rage Dual Sport (ECE)", 5500.0, "9b59b6", "Axor", ["helmet", "dual sport", "axor"]),
        item!(107, "SMK Glide Modular (Bluetooth Ready)", 8200.0, "e67e22", "SMK", ["helmet", "modular", "smk"]),
        item!(108, "MT Revenge 2 Full Face (ECE)", 6800.0, "7f8c8d", "MT", ["helmet", "full face", "mt"]),
        item!(109, "Axor Apex Full Face (Budget)", 4100.0, "c0392b", "Axor", ["helmet", "full face", "axor"]),
        item!(110, "SMK Twister Full Face (Pinlock Included)", 5800.0, "27ae60", "SMK", ["helmet", "full face", "smk"]),
        item!(111, "MT Optimus SV Modular (ECE)", 7100.0, "34495e", "MT", ["helmet", "modular", "mt"]),
        item!(112, "Axor Jet Open Face (Cruiser)", 2400.0, "95a5a6", "Axor", ["helmet", "open face", "axor"]),
        item!(113, "SMK Cooper Jet (ISI)", 3100.0, "d35400", "SMK", ["helmet", "open face", "smk"]),
        item!(114, "MT Blade 2 Full Face (Race Fit)", 5950.0, "f1c40f", "MT", ["helmet", "full face", "mt"]),
        item!(115, "Axor Venom Dual Visor (ECE)", 6300.0, "8e44ad", "Axor", ["helmet", "full face", "axor"]),

        item!(201, "DSG Rynox Mesh (CE Level 2)", 8500.0, "ff5733", "Rynox", ["jacket", "mesh", "dsg", "rynox"]),
        item!(202, "Raida Bolt Leather Jacket", 12999.0, "000000", "Raida", ["jacket", "leather", "raida"]),
        item!(203, "Solace Urban Touring Textile", 9200.0, "2980b9", "Solace", ["jacket", "textile", "solace"]),
        item!(204, "DSG Nexus Mesh (Budget)", 5400.0, "7f8c8d", "DSG", ["jacket", "mesh", "dsg"]),
        item!(205, "Rynox Air GT 4 Textile (All Season)", 11500.0, "f1c40f", "Rynox", ["jacket", "textile", "rynox"]),
        item!(206, "Raida Breeze Summer Mesh", 6800.0, "c0392b", "Raida", ["jacket", "mesh", "raida"]),
        item!(207, "Solace Coolmax Textile (Waterproof)", 10500.0, "e67e22", "Solace", ["jacket", "textile", "solace"]),
        item!(208, "DSG Rynox Rynox Air Mesh", 7900.0, "16a085", "Rynox", ["jacket", "mesh", "dsg", "rynox"]),
        item!(209, "Raida Touring Adventure Jacket", 15500.0, "8e44ad", "Raida", ["jacket", "textile", "raida", "adventure"]),
        item!(210, "Solace Fury Leather Race Jacket", 18999.0, "2ecc71", "Solace", ["jacket", "leather", "solace"]),
        item!(211, "DSG Genesis Leather", 16200.0, "34495e", "DSG", ["jacket", "leather", "dsg"]),
        item!(212, "Rynox Storm Evo Textile (Winter)", 13800.0, "95a5a6", "Rynox", ["jacket", "textile", "rynox"]),
        item!(213, "Raida Aero Mesh Jacket", 7100.0, "d35400", "Raida", ["jacket", "mesh", "raida"]),
        item!(214, "Solace Rain Pro Shell", 4500.0, "f1c40f", "Solace", ["jacket", "textile"]),
        item!(215, "DSG Rynox Rynox Xterra Adventure", 10200.0, "8e44ad", "Rynox", ["jacket", "textile", "dsg", "rynox"]),

        item!(301, "Raida Airwave Short Mesh", 1999.0, "ff5733", "Raida", ["glove", "mesh", "textile", "raida", "airwave"]),
        item!(302, "Rynox Urban X Leather Gloves", 3450.0, "000000", "Rynox", ["glove", "leather", "rynox"]),
        item!(303, "Solace Storm Full Gauntlet", 4100.0, "2980b9", "Solace", ["glove", "textile", "solace"]),
        item!(304, "Raida Rover Leather Touring", 2999.0, "7f8c8d", "Raida", ["glove", "leather", "raida"]),
        item!(305, "Rynox Hooligan Short Gloves", 1800.0, "f1c40f", "Rynox", ["glove", "textile", "rynox"]),
        item!(306, "Solace Track Race Gloves", 6500.0, "c0392b", "Solace", ["glove", "leather", "solace"]),
        item!(307, "Raida Trail Enduro Gloves", 1550.0, "e67e22", "Raida", ["glove", "textile", "raida"]),
        item!(308, "Rynox Kombat EVO (Winter)", 4999.0, "16a085", "Rynox", ["glove", "textile", "rynox"]),
        item!(309, "Solace Airtech V2 Mesh", 2200.0, "8e44ad", "Solace", ["glove", "mesh", "solace"]),
        item!(310, "Raida Tornado Pro Race Gloves", 5100.0, "2ecc71", "Raida", ["glove", "leather", "raida"]),
        item!(311, "Rynox Breeze Short Cuff", 2600.0, "34495e", "Rynox", ["glove", "textile", "rynox"]),
        item!(312, "Solace Urban Short Leather", 3999.0, "95a5a6", "Solace", ["glove", "leather", "solace"]),
        item!(313, "Raida Blaze Full Gauntlet", 4500.0, "d35400", "Raida", ["glove", "leather", "raida"]),
        item!(314, "Rynox Stealth Waterproof", 3100.0, "f1c40f", "Rynox", ["glove", "textile", "rynox"]),
        item!(315, "Solace Off-Road Grip", 1650.0, "8e44ad", "Solace", ["glove", "textile", "solace"]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(keywords: &[&str], max_price: Option<f64>) -> ProductQuery {
        ProductQuery { keywords: keywords.iter().map(|k| k.to_string()).collect(), max_price }
    }

    #[test]
    fn filters_by_keyword_and_price() {
        let catalog = Catalog::builtin();
        let found = catalog.search(&query(&["helmet"], Some(5000.0)));
        assert!(!found.is_empty());
        assert!(found.iter().all(|p| p.price <= 5000.0));
        assert_eq!(found[0].name, "SMK Stellar Full Face (DOT/ECE)");
    }

    #[test]
    fn all_keywords_must_match() {
        let catalog = Catalog::builtin();
        let found = catalog.search(&query(&["jacket", "mesh"], None));
        assert_eq!(found.len(), 5);
        assert!(found.iter().all(|p| !p.name.contains("Leather")));
    }

    #[test]
    fn builtin_catalog_is_complete() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), 45);
        assert!(!catalog.is_empty());

        let modular: Vec<String> = catalog
            .search(&query(&["helmet", "modular"], None))
            .into_iter()
            .map(|p| p.link)
            .collect();
        assert_eq!(modular, ["/product/102", "/product/104", "/product/107", "/product/111"]);
    }

    #[test]
    fn caps_results_and_handles_no_match() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.search(&query(&["glove"], None)).len(), MAX_RESULTS);
        assert!(catalog.search(&query(&["helmet"], Some(100.0))).is_empty());
    }
}
