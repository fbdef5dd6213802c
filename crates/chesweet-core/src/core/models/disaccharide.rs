use phf::{Map, phf_map};

/// Glycosidic linkage markers that change the shape of a disaccharide's table.
/// Every other linkage (1-2, 1-3, 1-4, ...) is [`BondType::Other`].
static LINKAGE_MARKERS: Map<&'static str, BondType> = phf_map! {
    "-1-1-" => BondType::OneOne,
    "-1-6-" => BondType::OneSix,
};

/// Kind of glycosidic bond named by a disaccharide key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BondType {
    /// 1-1 linkage (e.g. trehalose). Has one side-chain torsion fewer in full mode.
    OneOne,
    /// 1-6 linkage. Carries the omega torsion in reduced mode.
    OneSix,
    /// Any other linkage.
    Other,
}

impl BondType {
    /// Classifies a disaccharide key such as `"a-D-Glcp-1-6-b-D-Galp"`.
    pub fn from_key(disaccharide: &str) -> Self {
        LINKAGE_MARKERS
            .entries()
            .find(|(marker, _)| disaccharide.contains(*marker))
            .map(|(_, bond)| *bond)
            .unwrap_or(BondType::Other)
    }
}

/// Extracts the donor and acceptor carbon numbers from a disaccharide key.
///
/// Keys are dash separated, `<anomer>-<D|L>-<residue>-<donor>-<acceptor>-<anomer>-<D|L>-<residue>`,
/// so `"b-D-GlcpNAc-1-4-b-D-Glcp1Me2NAc"` gives `Some((1, 4))`. The first pair of
/// consecutive numeric fields is taken; keys without one give `None`.
pub fn linkage_carbons(disaccharide: &str) -> Option<(u8, u8)> {
    let fields: Vec<&str> = disaccharide.split('-').collect();
    fields.windows(2).find_map(|pair| {
        let donor = pair[0].parse::<u8>().ok()?;
        let acceptor = pair[1].parse::<u8>().ok()?;
        Some((donor, acceptor))
    })
}

/// Label of the acceptor carbon ("Cx") of a disaccharide, e.g. `"C4"` for a 1-4 bond.
pub fn acceptor_carbon_label(disaccharide: &str) -> String {
    match linkage_carbons(disaccharide) {
        Some((_, acceptor)) => format!("C{}", acceptor),
        None => "Cx".to_string(),
    }
}
