use crate::error::InstrumentError;
use crate::scoring::{AnswerRange, Band, InstrumentDefinition, InstrumentId, Threshold, Tier};

const BERGEN_ITEMS: &[&str] = &[
    "q1_salience",
    "q2_tolerance",
    "q3_mood_modification",
    "q4_relapse",
    "q5_withdrawal",
    "q6_conflict",
];

const TWENTY_ITEMS: &[&str] = &[
    "q1", "q2", "q3", "q4", "q5", "q6", "q7", "q8", "q9", "q10", "q11", "q12", "q13", "q14",
    "q15", "q16", "q17", "q18", "q19", "q20",
];

const THIRTEEN_ITEMS: &[&str] = &[
    "q1", "q2", "q3", "q4", "q5", "q6", "q7", "q8", "q9", "q10", "q11", "q12", "q13",
];

const fn tier(band: Band, label: &'static str) -> Tier {
    Tier { band, label }
}

const fn threshold(upper_bound: u32, band: Band, label: &'static str) -> Threshold {
    Threshold {
        upper_bound,
        tier: tier(band, label),
    }
}

static DEFINITIONS: [InstrumentDefinition; 5] = [
    InstrumentDefinition {
        id: InstrumentId::BergenTiktok,
        name: "Bergen TikTok",
        title: "Bergen TikTok - Escala de Adicción a TikTok",
        item_keys: BERGEN_ITEMS,
        range: AnswerRange { min: 1, max: 5 },
        thresholds: &[
            threshold(12, Band::Low, "Bajo riesgo de adicción a TikTok"),
            threshold(18, Band::Moderate, "Riesgo moderado de adicción a TikTok"),
        ],
        catch_all: tier(Band::High, "Alto riesgo de adicción a TikTok"),
    },
    InstrumentDefinition {
        id: InstrumentId::BergenInstagram,
        name: "Bergen Instagram",
        title: "Bergen Instagram - Escala de Adicción a Instagram",
        item_keys: BERGEN_ITEMS,
        range: AnswerRange { min: 1, max: 5 },
        thresholds: &[
            threshold(12, Band::Low, "Bajo riesgo de adicción a Instagram"),
            threshold(18, Band::Moderate, "Riesgo moderado de adicción a Instagram"),
        ],
        catch_all: tier(Band::High, "Alto riesgo de adicción a Instagram"),
    },
    InstrumentDefinition {
        id: InstrumentId::UclaLoneliness,
        name: "UCLA Loneliness",
        title: "UCLA - Escala de Soledad",
        item_keys: TWENTY_ITEMS,
        range: AnswerRange { min: 1, max: 4 },
        thresholds: &[
            threshold(35, Band::Low, "Nivel bajo de soledad"),
            threshold(50, Band::Moderate, "Nivel moderado de soledad"),
        ],
        catch_all: tier(Band::High, "Nivel alto de soledad"),
    },
    InstrumentDefinition {
        id: InstrumentId::PrefrontalSymptoms,
        name: "Prefrontal Symptoms",
        title: "Síntomas Prefrontales - Inventario Abreviado",
        item_keys: TWENTY_ITEMS,
        range: AnswerRange { min: 0, max: 4 },
        thresholds: &[
            threshold(20, Band::Low, "Síntomas prefrontales mínimos"),
            threshold(40, Band::Moderate, "Síntomas prefrontales leves a moderados"),
        ],
        catch_all: tier(Band::High, "Síntomas prefrontales significativos"),
    },
    InstrumentDefinition {
        id: InstrumentId::Caids,
        name: "CAIDS",
        title: "CAIDS - Dependencia de IA Conversacional",
        item_keys: THIRTEEN_ITEMS,
        range: AnswerRange { min: 1, max: 5 },
        thresholds: &[
            threshold(26, Band::Low, "Baja dependencia de IA conversacional"),
            threshold(39, Band::Moderate, "Dependencia moderada de IA conversacional"),
        ],
        catch_all: tier(Band::High, "Alta dependencia de IA conversacional"),
    },
];

/// Every instrument, in canonical order.
pub fn all_definitions() -> &'static [InstrumentDefinition] {
    &DEFINITIONS
}

/// Definition for a known instrument.
pub fn definition(id: InstrumentId) -> &'static InstrumentDefinition {
    match id {
        InstrumentId::BergenTiktok => &DEFINITIONS[0],
        InstrumentId::BergenInstagram => &DEFINITIONS[1],
        InstrumentId::UclaLoneliness => &DEFINITIONS[2],
        InstrumentId::PrefrontalSymptoms => &DEFINITIONS[3],
        InstrumentId::Caids => &DEFINITIONS[4],
    }
}

/// Look up a definition by its wire id.
pub fn find_definition(id: &str) -> Result<&'static InstrumentDefinition, InstrumentError> {
    let id: InstrumentId = id.parse()?;
    Ok(definition(id))
}
