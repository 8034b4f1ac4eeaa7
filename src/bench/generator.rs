//! Request generation.

use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use crate::domain::catalog::{CriterionCatalog, ScoreTriple};
use crate::domain::wizard::{MAX_OVERRIDE_WEIGHT, MIN_OVERRIDE_WEIGHT};

/// Edge cases replace the first requests once there are more than this many.
const EDGE_CASE_THRESHOLD: usize = 5;

/// Body of `POST /api/recommend`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadRequest {
    pub selected_criteria: Vec<String>,
    pub criteria_priorities: HashMap<String, u8>,
    pub overridden_scores: HashMap<String, ScoreTriple>,
    pub special_values: HashMap<String, String>,
}

/// Generates `count` requests over the catalog's criteria.
///
/// Each random request selects between one and all-but-one criteria with
/// priorities 1..=5, resolves every selected special criterion, and
/// overrides up to half of the selection with weights 1..=10. When
/// `count` exceeds five the first three requests are fixed edge cases:
/// everything at priority 3, the first criterion alone at 5, and only the
/// special criteria at 4.
pub fn generate_requests<R: Rng + ?Sized>(
    catalog: &CriterionCatalog,
    count: usize,
    rng: &mut R,
) -> Vec<LoadRequest> {
    let mut requests: Vec<LoadRequest> = (0..count).map(|_| random_request(catalog, rng)).collect();

    if count > EDGE_CASE_THRESHOLD {
        requests[0] = all_criteria(catalog);
        requests[1] = single_criterion(catalog);
        requests[2] = only_special(catalog);
    }
    requests
}

fn random_request<R: Rng + ?Sized>(catalog: &CriterionCatalog, rng: &mut R) -> LoadRequest {
    let mut names: Vec<&str> = catalog.criteria().iter().map(|c| c.name.as_str()).collect();
    names.shuffle(rng);
    let upper = names.len().saturating_sub(1).max(1);
    let selected = rng.gen_range(1..=upper).min(names.len());

    let mut request = LoadRequest::default();
    for name in names.into_iter().take(selected) {
        request.selected_criteria.push(name.to_string());
        request
            .criteria_priorities
            .insert(name.to_string(), rng.gen_range(1..=5));
        if let Some(scale) = catalog.get(name).and_then(|c| c.special.as_ref()) {
            if let Some(option) = scale.options.choose(rng) {
                request
                    .special_values
                    .insert(name.to_string(), option.label.clone());
            }
        }
    }

    let overrides = rng.gen_range(0..=selected / 2);
    for name in request.selected_criteria.iter().take(overrides) {
        let scores = ScoreTriple::new(
            rng.gen_range(MIN_OVERRIDE_WEIGHT..=MAX_OVERRIDE_WEIGHT),
            rng.gen_range(MIN_OVERRIDE_WEIGHT..=MAX_OVERRIDE_WEIGHT),
            rng.gen_range(MIN_OVERRIDE_WEIGHT..=MAX_OVERRIDE_WEIGHT),
        );
        request.overridden_scores.insert(name.clone(), scores);
    }
    request
}

fn all_criteria(catalog: &CriterionCatalog) -> LoadRequest {
    let mut request = LoadRequest::default();
    for criterion in catalog.criteria() {
        request.selected_criteria.push(criterion.name.clone());
        request.criteria_priorities.insert(criterion.name.clone(), 3);
        if let Some(option) = criterion.special.as_ref().and_then(|s| s.options.first()) {
            request
                .special_values
                .insert(criterion.name.clone(), option.label.clone());
        }
    }
    request
}

fn single_criterion(catalog: &CriterionCatalog) -> LoadRequest {
    let mut request = LoadRequest::default();
    if let Some(criterion) = catalog.criteria().first() {
        request.selected_criteria.push(criterion.name.clone());
        request.criteria_priorities.insert(criterion.name.clone(), 5);
    }
    request
}

fn only_special(catalog: &CriterionCatalog) -> LoadRequest {
    let mut request = LoadRequest::default();
    for criterion in catalog.criteria() {
        let Some(option) = criterion.special.as_ref().and_then(|s| s.options.last()) else {
            continue;
        };
        request.selected_criteria.push(criterion.name.clone());
        request.criteria_priorities.insert(criterion.name.clone(), 4);
        request
            .special_values
            .insert(criterion.name.clone(), option.label.clone());
    }
    request
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn catalog() -> &'static CriterionCatalog {
        CriterionCatalog::builtin()
    }

    #[test]
    fn edge_cases_lead_large_batches() {
        let requests = generate_requests(catalog(), 10, &mut StdRng::seed_from_u64(7));

        assert_eq!(requests.len(), 10);
        assert_eq!(requests[0].selected_criteria.len(), 12);
        assert!(requests[0].criteria_priorities.values().all(|p| *p == 3));
        assert_eq!(requests[0].special_values["Объём данных"], "Малый");

        assert_eq!(requests[1].selected_criteria, vec!["Юрисдикция данных"]);
        assert_eq!(requests[1].criteria_priorities["Юрисдикция данных"], 5);

        assert_eq!(
            requests[2].selected_criteria,
            vec!["Объём данных", "Срок использования"]
        );
        assert_eq!(requests[2].special_values["Объём данных"], "Большой");
        assert_eq!(requests[2].special_values["Срок использования"], "Долгосрочный");
    }

    #[test]
    fn small_batches_are_all_random() {
        let requests = generate_requests(catalog(), 5, &mut StdRng::seed_from_u64(1));
        assert_eq!(requests.len(), 5);
        assert!(requests.iter().all(|r| r.selected_criteria.len() < 12));
    }

    #[test]
    fn zero_requests() {
        assert!(generate_requests(catalog(), 0, &mut StdRng::seed_from_u64(1)).is_empty());
    }

    proptest! {
        #[test]
        fn random_requests_are_scoreable(seed in any::<u64>()) {
            let mut rng = StdRng::seed_from_u64(seed);
            let request = random_request(catalog(), &mut rng);

            let unique: HashSet<_> = request.selected_criteria.iter().collect();
            prop_assert_eq!(unique.len(), request.selected_criteria.len());
            prop_assert!(!request.selected_criteria.is_empty());
            prop_assert!(request.selected_criteria.len() <= 11);

            for name in &request.selected_criteria {
                let p = request.criteria_priorities[name];
                prop_assert!((1..=5).contains(&p));
                let criterion = catalog().get(name).unwrap();
                prop_assert_eq!(criterion.is_special(), request.special_values.contains_key(name));
            }
            prop_assert!(request.overridden_scores.len() <= request.selected_criteria.len() / 2);
            for scores in request.overridden_scores.values() {
                for value in [scores.on_prem, scores.private, scores.public] {
                    prop_assert!((1..=10).contains(&value));
                }
            }
        }
    }
}
