use rand::Rng;
use rand::seq::IndexedRandom;
use sw_core::LabelRecord;

use crate::error::MixError;
use crate::plan::{MixPlan, MixStyle};

/// How many clips go into every mix.
pub const CLIPS_PER_MIX: usize = 3;

/// A resolved remix request: the plan plus the presentation data derived
/// from the mood pool.
#[derive(Clone, Debug)]
pub struct Selection {
    /// The plan handed to the engine.
    pub plan: MixPlan,
    /// Title derived from the full filtered pool (not just the 3 picks).
    pub title: String,
    /// The three selected records, in plan order.
    pub used: Vec<LabelRecord>,
}

/// Filter `records` by mood (trimmed, case-insensitive) and draw three
/// distinct clips uniformly without replacement.
///
/// # Errors
/// Returns [`MixError::InsufficientPool`] when fewer than three records
/// match — a recoverable, user-visible condition.
pub fn select_for_mood<R: Rng + ?Sized>(
    records: &[LabelRecord],
    mood: &str,
    style: MixStyle,
    rng: &mut R,
) -> Result<Selection, MixError> {
    // Compare normalized label strings, not lenient-parsed enums: an
    // unrecognized request must find zero records, never the unknown pool
    let mood_norm = mood.trim().to_lowercase();
    let pool: Vec<&LabelRecord> = records
        .iter()
        .filter(|r| r.mood.as_str() == mood_norm)
        .collect();

    if pool.len() < CLIPS_PER_MIX {
        return Err(MixError::InsufficientPool {
            mood: mood_norm,
            found: pool.len(),
        });
    }

    let picks: Vec<&LabelRecord> = pool
        .choose_multiple(rng, CLIPS_PER_MIX)
        .copied()
        .collect();
    let filenames = [
        picks[0].filename.clone(),
        picks[1].filename.clone(),
        picks[2].filename.clone(),
    ];
    log::info!("Selected clips for mood '{mood_norm}': {filenames:?}");

    Ok(Selection {
        title: derive_title(&mood_norm, &pool),
        used: picks.into_iter().cloned().collect(),
        plan: MixPlan {
            mood: mood_norm,
            style,
            filenames,
        },
    })
}

/// `"<Mood capitalized> Mix: <distinct locations> with <distinct types>"`,
/// both lists deduplicated in first-appearance order over the full pool.
fn derive_title(mood: &str, pool: &[&LabelRecord]) -> String {
    let locations = distinct(pool.iter().map(|r| r.location.as_str()));
    let kinds = distinct(pool.iter().map(|r| r.kind.as_str()));
    format!(
        "{} Mix: {} with {}",
        capitalize(mood),
        locations.join(" + "),
        kinds.join(", ")
    )
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen: Vec<&str> = Vec::new();
    for value in values {
        if !seen.contains(&value) {
            seen.push(value);
        }
    }
    seen
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().collect::<String>() + chars.as_str()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use sw_core::{ClipType, Mood};

    fn record(filename: &str, location: &str, mood: Mood, kind: ClipType) -> LabelRecord {
        LabelRecord {
            filename: filename.to_owned(),
            location: location.to_owned(),
            time: "Unknown".to_owned(),
            mood,
            kind,
        }
    }

    fn calm_pool(n: usize) -> Vec<LabelRecord> {
        (0..n)
            .map(|i| {
                record(
                    &format!("calm_{i}.wav"),
                    "Quad",
                    Mood::Calm,
                    ClipType::Ambience,
                )
            })
            .collect()
    }

    #[test]
    fn two_matching_records_are_insufficient() {
        let records = calm_pool(2);
        let mut rng = StdRng::seed_from_u64(7);
        match select_for_mood(&records, "calm", MixStyle::Overlay, &mut rng) {
            Err(MixError::InsufficientPool { mood, found }) => {
                assert_eq!(mood, "calm");
                assert_eq!(found, 2);
            }
            other => panic!("expected InsufficientPool, got {other:?}"),
        }
    }

    #[test]
    fn five_matching_records_always_yield_three_distinct() {
        let mut records = calm_pool(5);
        records.push(record("band.mp3", "Stage", Mood::Energetic, ClipType::Music));
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let selection = match select_for_mood(&records, "calm", MixStyle::Looped, &mut rng) {
                Ok(s) => s,
                Err(e) => panic!("selection failed: {e}"),
            };
            let names = &selection.plan.filenames;
            assert_ne!(names[0], names[1]);
            assert_ne!(names[1], names[2]);
            assert_ne!(names[0], names[2]);
            assert!(selection.used.iter().all(|r| r.mood == Mood::Calm));
        }
    }

    #[test]
    fn unrecognized_mood_never_borrows_the_unknown_pool() {
        let records = vec![
            record("a.wav", "Quad", Mood::Unknown, ClipType::Unknown),
            record("b.wav", "Quad", Mood::Unknown, ClipType::Unknown),
            record("c.wav", "Quad", Mood::Unknown, ClipType::Unknown),
        ];
        let mut rng = StdRng::seed_from_u64(11);
        match select_for_mood(&records, "busy", MixStyle::Sequential, &mut rng) {
            Err(MixError::InsufficientPool { mood, found }) => {
                assert_eq!(mood, "busy");
                assert_eq!(found, 0);
            }
            other => panic!("expected InsufficientPool, got {other:?}"),
        }
        // A literal "unknown" request still reaches those records
        let mut rng = StdRng::seed_from_u64(11);
        assert!(select_for_mood(&records, "unknown", MixStyle::Sequential, &mut rng).is_ok());
    }

    #[test]
    fn mood_matching_trims_and_ignores_case() {
        let records = calm_pool(3);
        let mut rng = StdRng::seed_from_u64(1);
        assert!(select_for_mood(&records, "  CALM ", MixStyle::Echo, &mut rng).is_ok());
    }

    #[test]
    fn title_joins_distinct_locations_and_types_from_full_pool() {
        let records = vec![
            record("a.wav", "Quad", Mood::Calm, ClipType::Ambience),
            record("b.wav", "Library", Mood::Calm, ClipType::Music),
            record("c.wav", "Quad", Mood::Calm, ClipType::Ambience),
            record("d.wav", "Cafe", Mood::Calm, ClipType::Ambience),
        ];
        let mut rng = StdRng::seed_from_u64(3);
        let selection = match select_for_mood(&records, "calm", MixStyle::Sequential, &mut rng) {
            Ok(s) => s,
            Err(e) => panic!("selection failed: {e}"),
        };
        assert_eq!(
            selection.title,
            "Calm Mix: Quad + Library + Cafe with ambience, music"
        );
    }

    #[test]
    fn selection_is_deterministic_under_a_fixed_seed() {
        let records = calm_pool(8);
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        let first = select_for_mood(&records, "calm", MixStyle::Overlay, &mut a);
        let second = select_for_mood(&records, "calm", MixStyle::Overlay, &mut b);
        match (first, second) {
            (Ok(x), Ok(y)) => assert_eq!(x.plan.filenames, y.plan.filenames),
            other => panic!("selection failed: {other:?}"),
        }
    }
}
