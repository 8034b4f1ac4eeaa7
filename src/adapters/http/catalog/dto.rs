//! HTTP DTOs for the catalog endpoint.

use serde::{Deserialize, Serialize};

use crate::domain::catalog::{Criterion, CriterionCatalog, ScoreTriple, SpecialScale};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecialOptionResponse {
    pub label: String,
    pub hint: String,
    pub scores: ScoreTriple,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecialScaleResponse {
    pub key: String,
    pub prompt: String,
    pub options: Vec<SpecialOptionResponse>,
}

impl From<&SpecialScale> for SpecialScaleResponse {
    fn from(scale: &SpecialScale) -> Self {
        Self {
            key: scale.key.clone(),
            prompt: scale.prompt.clone(),
            options: scale
                .options
                .iter()
                .map(|o| SpecialOptionResponse {
                    label: o.label.clone(),
                    hint: o.hint.clone(),
                    scores: o.scores,
                })
                .collect(),
        }
    }
}

/// A criterion with its position in the catalog (used in callback tokens).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriterionResponse {
    pub index: usize,
    pub name: String,
    pub category: String,
    pub description: String,
    pub base_scores: ScoreTriple,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special: Option<SpecialScaleResponse>,
}

impl CriterionResponse {
    fn new(index: usize, criterion: &Criterion) -> Self {
        Self {
            index,
            name: criterion.name.clone(),
            category: criterion.category.clone(),
            description: criterion.description.clone(),
            base_scores: criterion.base_scores,
            special: criterion.special.as_ref().map(Into::into),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogResponse {
    pub categories: Vec<String>,
    pub criteria: Vec<CriterionResponse>,
}

impl From<&CriterionCatalog> for CatalogResponse {
    fn from(catalog: &CriterionCatalog) -> Self {
        Self {
            categories: catalog.categories().into_iter().map(str::to_string).collect(),
            criteria: catalog
                .criteria()
                .iter()
                .enumerate()
                .map(|(index, criterion)| CriterionResponse::new(index, criterion))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_converts_with_indices() {
        let response = CatalogResponse::from(CriterionCatalog::builtin());

        assert_eq!(response.criteria.len(), 12);
        assert_eq!(response.categories.len(), 4);
        assert_eq!(response.criteria[3].index, 3);
        assert_eq!(response.criteria[3].special.as_ref().unwrap().key, "sdata");
        assert!(response.criteria[0].special.is_none());
    }
}
