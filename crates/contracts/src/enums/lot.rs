use serde::Serialize;

use crate::shared::metadata::Choice;

/// Farm lot that can be monitored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Lot {
    pub code: &'static str,
    pub label: &'static str,
    /// Known plant count; `None` for lots measured otherwise (renovation modules, linear metres)
    pub plant_count: Option<u32>,
}

const LOT_TABLE: [Lot; 13] = [
    Lot { code: "l1", label: "Lote 1. Naranja - Bodega - 45 Plantas", plant_count: Some(45) },
    Lot { code: "l2", label: "Lote 2. Naranja- Guadual - 108 Plantas", plant_count: Some(108) },
    Lot { code: "l3", label: "Lote 3. Naranja pequeña - 124 Plantas", plant_count: Some(124) },
    Lot { code: "l4", label: "Lote 4. Mandarina - Paneles - 53 Plantas", plant_count: Some(53) },
    Lot { code: "l5", label: "Lote 5. Naranja - Oficina - 127 Plantas", plant_count: Some(127) },
    Lot { code: "l6", label: "Lote 6. Mandarina Adulta - 114 Plantas", plant_count: Some(114) },
    Lot { code: "l7", label: "Lote 7. Aguacate - 30 Plantas", plant_count: Some(30) },
    Lot { code: "l8", label: "Lote 8. Mandarina Joven - 164 Plantas", plant_count: Some(164) },
    Lot { code: "l9", label: "Lote 9. Naranja Adulta - 216 Plantas", plant_count: Some(216) },
    Lot { code: "l10", label: "Lote 10. Limón Joven - 125 Plantas", plant_count: Some(125) },
    Lot { code: "l11", label: "Lote 11. Limón Adulto - 64 Plantas", plant_count: Some(64) },
    Lot { code: "l12", label: "Lote 12. Renovación 5 Módulos", plant_count: None },
    Lot {
        code: "l13",
        label: "Lote 13. Lote Swinglea glutinos - Cantidad de metros lineales",
        plant_count: None,
    },
];

pub const LOTES: &[Lot] = &LOT_TABLE;

/// (value, label) pairs for the lot select
pub const LOT_CHOICES: &[Choice] = &lot_choices(LOT_TABLE);

const fn lot_choices<const N: usize>(lots: [Lot; N]) -> [Choice; N] {
    let mut out = [("", ""); N];
    let mut i = 0;
    while i < N {
        out[i] = (lots[i].code, lots[i].label);
        i += 1;
    }
    out
}

impl Lot {
    pub fn find(code: &str) -> Option<&'static Lot> {
        LOTES.iter().find(|lot| lot.code == code)
    }
}
