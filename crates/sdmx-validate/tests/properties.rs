use std::collections::BTreeSet;

use proptest::prelude::*;
use sdmx_model::{
    Codelist, Component, ConstraintStore, ConstraintTable, DataMessage, Dataset, Observation,
    Series, SeriesKey, StructureDefinition, StructureIndex,
};
use sdmx_validate::{check_content, dedupe_messages, filter_dataset};

const AREAS: &[&str] = &["USA", "CAN", "FRA"];
const SEXES: &[&str] = &["F", "M", "_T", "X"];
const SERIES_CODES: &[&str] = &["A", "B", "C"];
const AGES: &[&str] = &["15-24", "25-34", "35-44"];

fn structure() -> StructureIndex {
    StructureIndex::new(
        &StructureDefinition::new("SDG_DSD")
            .with_dimension(Component::free("SERIES"))
            .with_dimension(Component::coded(
                "REF_AREA",
                Codelist::new("CL_AREA", ["USA", "CAN"]),
            ))
            .with_dimension(Component::coded(
                "SEX",
                Codelist::new("CL_SEX", ["F", "M", "_T"]),
            )),
    )
}

fn constraints() -> ConstraintStore {
    ConstraintStore::from_table(
        &ConstraintTable::default()
            .with_row([("SERIES", "A"), ("SEX", "F;M"), ("AGE", "_T;15-24")])
            .with_row([("SERIES", "B"), ("SEX", "ALL"), ("AGE", "25-34")]),
    )
}

fn series_strategy() -> impl Strategy<Value = Series> {
    (
        prop::sample::select(SERIES_CODES),
        prop::sample::select(AREAS),
        prop::sample::select(SEXES),
        prop::option::of(prop::option::of(prop::sample::select(AGES))),
        any::<bool>(),
    )
        .prop_map(|(code, area, sex, age, has_observation)| {
            let key = SeriesKey::new()
                .with("SERIES", code)
                .with("REF_AREA", area)
                .with("SEX", sex);
            let mut observation = Observation::new("2020", "1");
            match age {
                None => {}
                Some(None) => observation = observation.with_missing_attribute("AGE"),
                Some(Some(age)) => observation = observation.with_attribute("AGE", age),
            }
            let series = Series::new(key);
            if has_observation {
                series.with_observation(observation)
            } else {
                series
            }
        })
}

fn message_strategy() -> impl Strategy<Value = DataMessage> {
    prop::collection::vec(prop::collection::vec(series_strategy(), 0..12), 1..3).prop_map(
        |datasets| {
            datasets
                .into_iter()
                .fold(DataMessage::new("GENERATED"), |message, series| {
                    message.with_dataset(Dataset {
                        structure: "SDG_DSD".to_string(),
                        series,
                    })
                })
        },
    )
}

proptest! {
    #[test]
    fn counts_partition_the_input(message in message_strategy()) {
        let result = filter_dataset(&message, &constraints(), &structure());
        let report = &result.report;

        prop_assert_eq!(report.kept + report.removed, report.total);
        prop_assert_eq!(report.total, message.series_count());
        prop_assert_eq!(report.kept, result.message.series_count());
        prop_assert!(report.dsd_violation_count <= report.removed);
        prop_assert!(report.content_violation_count <= report.removed);
        prop_assert!(report.removed <= report.dsd_violation_count + report.content_violation_count);
        for summary in &report.datasets {
            prop_assert_eq!(summary.kept + summary.removed, summary.total);
        }
    }

    #[test]
    fn filtering_twice_removes_nothing(message in message_strategy()) {
        let first = filter_dataset(&message, &constraints(), &structure());
        let second = filter_dataset(&first.message, &constraints(), &structure());

        prop_assert_eq!(second.report.removed, 0);
        prop_assert!(second.report.messages().is_empty());
        prop_assert_eq!(second.message, first.message);
    }

    #[test]
    fn results_do_not_depend_on_series_order(message in message_strategy()) {
        let mut reversed = message.clone();
        for dataset in &mut reversed.datasets {
            dataset.series.reverse();
        }
        let forward = filter_dataset(&message, &constraints(), &structure());
        let again = filter_dataset(&message, &constraints(), &structure());
        let backward = filter_dataset(&reversed, &constraints(), &structure());

        prop_assert_eq!(&forward.report, &again.report);
        prop_assert_eq!(&forward.message, &again.message);
        prop_assert_eq!(&forward.report.dsd_messages, &backward.report.dsd_messages);
        prop_assert_eq!(&forward.report.content_messages, &backward.report.content_messages);
        prop_assert_eq!(forward.report.kept, backward.report.kept);
    }

    #[test]
    fn dedupe_is_sorted_distinct(messages in prop::collection::vec("[a-c]{0,3}", 0..20)) {
        let expected: Vec<String> = messages.iter().cloned().collect::<BTreeSet<_>>().into_iter().collect();
        let deduped = dedupe_messages(messages.clone());
        prop_assert_eq!(&deduped, &expected);
        prop_assert!(deduped.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn narrower_allowed_set_keeps_violations(
        value in prop::sample::select(AGES),
        allowed in prop::sample::subsequence(AGES.to_vec(), 1..=3),
        keep in 1usize..=3,
    ) {
        let narrowed = &allowed[..keep.min(allowed.len())];
        let loose = ConstraintStore::from_table(
            &ConstraintTable::default().with_row([("SERIES", "A".to_string()), ("AGE", allowed.join(";"))]),
        );
        let tight = ConstraintStore::from_table(
            &ConstraintTable::default().with_row([("SERIES", "A".to_string()), ("AGE", narrowed.join(";"))]),
        );
        let key = SeriesKey::new().with("SERIES", "A").with("AGE", value);

        let failing = |store: &ConstraintStore| {
            check_content(&key, &[], store).iter().any(|v| v.concept() == "AGE")
        };
        if failing(&loose) {
            prop_assert!(failing(&tight));
        }
    }
}
