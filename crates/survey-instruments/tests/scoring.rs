use survey_instruments::{
    Band, InstrumentError, InstrumentId, all_definitions, definition, find_definition, score_by_id,
};

fn answers_summing_to(id: InstrumentId, total: u32) -> Vec<i64> {
    let def = definition(id);
    let min = u32::from(def.range.min);
    let max = u32::from(def.range.max);
    let mut remaining = total - min * def.item_count() as u32;
    def.item_keys
        .iter()
        .map(|_| {
            let extra = remaining.min(max - min);
            remaining -= extra;
            i64::from(min + extra)
        })
        .collect()
}

#[test]
fn table_lists_five_instruments_in_canonical_order() {
    let ids: Vec<_> = all_definitions().iter().map(|d| d.id).collect();
    assert_eq!(ids, InstrumentId::ALL.to_vec());
}

#[test]
fn item_counts_and_ranges_match_each_instrument() {
    let expected = [
        (InstrumentId::BergenTiktok, 6, 1, 5),
        (InstrumentId::BergenInstagram, 6, 1, 5),
        (InstrumentId::UclaLoneliness, 20, 1, 4),
        (InstrumentId::PrefrontalSymptoms, 20, 0, 4),
        (InstrumentId::Caids, 13, 1, 5),
    ];
    for (id, items, min, max) in expected {
        let def = definition(id);
        assert_eq!(def.item_count(), items, "{id}");
        assert_eq!(def.range.min, min, "{id}");
        assert_eq!(def.range.max, max, "{id}");
    }
}

#[test]
fn thresholds_are_sorted_ascending() {
    for def in all_definitions() {
        let bounds: Vec<_> = def.thresholds.iter().map(|t| t.upper_bound).collect();
        let mut sorted = bounds.clone();
        sorted.sort_unstable();
        assert_eq!(bounds, sorted, "{}", def.id);
    }
}

#[test]
fn total_is_sum_of_answers() {
    let answers = [1, 2, 3, 4, 5, 1, 2, 3, 4, 5, 1, 2, 3];
    let score = definition(InstrumentId::Caids).score(&answers).unwrap();
    assert_eq!(score.total, answers.iter().sum::<i64>() as u32);
}

#[test]
fn scoring_is_deterministic() {
    let def = definition(InstrumentId::UclaLoneliness);
    let answers = vec![2; 20];
    assert_eq!(def.score(&answers).unwrap(), def.score(&answers).unwrap());
}

#[test]
fn boundary_totals_fall_into_the_lower_band() {
    let cases = [
        (InstrumentId::BergenTiktok, 12, 18),
        (InstrumentId::BergenInstagram, 12, 18),
        (InstrumentId::UclaLoneliness, 35, 50),
        (InstrumentId::PrefrontalSymptoms, 20, 40),
        (InstrumentId::Caids, 26, 39),
    ];
    for (id, low, moderate) in cases {
        let def = definition(id);
        let band_for = |total| def.score(&answers_summing_to(id, total)).unwrap().band;

        assert_eq!(band_for(low), Band::Low, "{id} at {low}");
        assert_eq!(band_for(low + 1), Band::Moderate, "{id} at {}", low + 1);
        assert_eq!(band_for(moderate), Band::Moderate, "{id} at {moderate}");
        assert_eq!(band_for(moderate + 1), Band::High, "{id} at {}", moderate + 1);
    }
}

#[test]
fn bergen_tiktok_scenarios() {
    let def = definition(InstrumentId::BergenTiktok);

    let moderate = def.score(&[3, 3, 3, 3, 3, 3]).unwrap();
    assert_eq!(moderate.total, 18);
    assert_eq!(moderate.band, Band::Moderate);
    assert_eq!(moderate.label, "Riesgo moderado de adicción a TikTok");

    let high = def.score(&[5, 5, 5, 5, 5, 5]).unwrap();
    assert_eq!(high.total, 30);
    assert_eq!(high.band, Band::High);
    assert_eq!(high.label, "Alto riesgo de adicción a TikTok");

    let low = def.score(&[2, 2, 2, 2, 2, 2]).unwrap();
    assert_eq!(low.total, 12);
    assert_eq!(low.label, "Bajo riesgo de adicción a TikTok");
}

#[test]
fn prefrontal_inventory_accepts_zero_answers() {
    let score = definition(InstrumentId::PrefrontalSymptoms)
        .score(&[0; 20])
        .unwrap();
    assert_eq!(score.total, 0);
    assert_eq!(score.band, Band::Low);
}

#[test]
fn wrong_length_is_rejected_not_truncated() {
    let err = definition(InstrumentId::BergenTiktok)
        .score(&[3, 3, 3, 3, 3, 3, 3])
        .unwrap_err();
    assert_eq!(
        err,
        InstrumentError::ItemCount {
            instrument: InstrumentId::BergenTiktok,
            expected: 6,
            actual: 7,
        }
    );
}

#[test]
fn out_of_range_answer_names_index_and_bound() {
    let err = definition(InstrumentId::BergenTiktok)
        .score(&[3, 3, 6, 3, 3, 3])
        .unwrap_err();
    assert_eq!(
        err,
        InstrumentError::AboveMaximum {
            instrument: InstrumentId::BergenTiktok,
            index: 2,
            item: "q3_mood_modification",
            value: 6,
            max: 5,
        }
    );
    assert!(err.to_string().contains("bergen_tiktok[2]"));

    let err = definition(InstrumentId::UclaLoneliness)
        .score(&[0; 20])
        .unwrap_err();
    assert!(matches!(
        err,
        InstrumentError::BelowMinimum { index: 0, min: 1, value: 0, .. }
    ));
}

#[test]
fn unknown_instrument_is_a_configuration_error() {
    let err = find_definition("beck_depression").unwrap_err();
    assert!(err.is_configuration());

    let err = score_by_id("beck_depression", &[1, 2, 3]).unwrap_err();
    assert_eq!(err, InstrumentError::UnknownInstrument("beck_depression".to_string()));
}

#[test]
fn score_by_id_uses_the_named_definition() {
    let score = score_by_id("caids", &[3; 13]).unwrap();
    assert_eq!(score.total, 39);
    assert_eq!(score.band, Band::Moderate);
}

#[test]
fn wire_ids_round_trip_through_parse() {
    for id in InstrumentId::ALL {
        assert_eq!(id.as_str().parse::<InstrumentId>().unwrap(), id);
        assert_eq!(
            serde_json::to_value(id).unwrap(),
            serde_json::Value::String(id.as_str().to_string())
        );
    }
}
