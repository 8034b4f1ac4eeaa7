//! The criterion catalog: every criterion the user can pick from.
//!
//! Built once at startup, either from the built-in table or from a YAML
//! document, and shared read-only afterwards. Lookups return `Option`;
//! callers decide whether a miss is an error.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

use super::{Criterion, ScoreTriple, SpecialOption, SpecialScale};

/// Callback prefixes already used by the wizard; special keys may not reuse them.
pub const RESERVED_SCALE_KEYS: &[&str] = &["crit", "done", "prio", "override", "weight"];

/// Errors raised while building or loading a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file '{path}': {message}")]
    Read { path: String, message: String },

    #[error("Failed to parse catalog: {0}")]
    Parse(String),

    #[error("Catalog contains no criteria")]
    Empty,

    #[error("Criterion #{0} has an empty name")]
    EmptyName(usize),

    #[error("Duplicate criterion name '{0}'")]
    DuplicateName(String),

    #[error("Duplicate special scale key '{0}'")]
    DuplicateSpecialKey(String),

    #[error("Criterion '{criterion}' has invalid special key '{key}'")]
    InvalidSpecialKey { criterion: String, key: String },

    #[error("Special scale of '{0}' has no options")]
    EmptyScale(String),
}

/// On-disk shape of a catalog file.
#[derive(Debug, Deserialize, Serialize)]
struct CatalogDocument {
    criteria: Vec<Criterion>,
}

/// Ordered, validated collection of criteria.
///
/// Position in the catalog is the criterion's index in callback tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CriterionCatalog {
    criteria: Vec<Criterion>,
}

static BUILTIN: Lazy<CriterionCatalog> = Lazy::new(|| CriterionCatalog {
    criteria: default_criteria(),
});

impl CriterionCatalog {
    /// Builds a catalog, validating names and special scales.
    pub fn new(criteria: Vec<Criterion>) -> Result<Self, CatalogError> {
        Self::validate(&criteria)?;
        Ok(Self { criteria })
    }

    /// The built-in database deployment catalog.
    pub fn builtin() -> &'static CriterionCatalog {
        &BUILTIN
    }

    /// Parses a YAML document with a top-level `criteria` list.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, CatalogError> {
        let doc: CatalogDocument =
            serde_yaml::from_str(yaml).map_err(|e| CatalogError::Parse(e.to_string()))?;
        Self::new(doc.criteria)
    }

    /// Loads a YAML catalog from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|e| CatalogError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_yaml_str(&yaml)
    }

    fn validate(criteria: &[Criterion]) -> Result<(), CatalogError> {
        if criteria.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut names = HashSet::new();
        let mut keys = HashSet::new();

        for (index, criterion) in criteria.iter().enumerate() {
            if criterion.name.trim().is_empty() {
                return Err(CatalogError::EmptyName(index));
            }
            if !names.insert(criterion.name.as_str()) {
                return Err(CatalogError::DuplicateName(criterion.name.clone()));
            }

            if let Some(scale) = &criterion.special {
                let key_ok = scale
                    .key
                    .chars()
                    .next()
                    .is_some_and(|c| c.is_ascii_lowercase())
                    && scale
                        .key
                        .chars()
                        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
                    && !RESERVED_SCALE_KEYS.contains(&scale.key.as_str());
                if !key_ok {
                    return Err(CatalogError::InvalidSpecialKey {
                        criterion: criterion.name.clone(),
                        key: scale.key.clone(),
                    });
                }
                if !keys.insert(scale.key.as_str()) {
                    return Err(CatalogError::DuplicateSpecialKey(scale.key.clone()));
                }
                if scale.options.is_empty() {
                    return Err(CatalogError::EmptyScale(criterion.name.clone()));
                }
            }
        }

        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Lookups
    // ─────────────────────────────────────────────────────────────────────────

    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    /// Finds a criterion by exact name.
    pub fn get(&self, name: &str) -> Option<&Criterion> {
        self.criteria.iter().find(|c| c.name == name)
    }

    pub fn get_by_index(&self, index: usize) -> Option<&Criterion> {
        self.criteria.get(index)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.criteria.iter().position(|c| c.name == name)
    }

    /// Finds the special criterion whose scale uses the given callback key.
    pub fn special_by_key(&self, key: &str) -> Option<(&Criterion, &SpecialScale)> {
        self.criteria.iter().find_map(|c| match &c.special {
            Some(scale) if scale.key == key => Some((c, scale)),
            _ => None,
        })
    }

    /// Distinct category labels in first-appearance order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for criterion in &self.criteria {
            if !seen.contains(&criterion.category.as_str()) {
                seen.push(criterion.category.as_str());
            }
        }
        seen
    }
}

impl Default for CriterionCatalog {
    fn default() -> Self {
        Self::builtin().clone()
    }
}

const REGULATORY: &str = "Регуляторные и безопасность";
const TECHNICAL: &str = "Технические";
const ECONOMIC: &str = "Экономические";
const ORGANIZATIONAL: &str = "Организационные";

fn default_criteria() -> Vec<Criterion> {
    vec![
        Criterion::new(
            "Юрисдикция данных",
            REGULATORY,
            ScoreTriple::new(8, 5, 4),
            "Насколько важна локализация данных и соответствие местным законам.",
        ),
        Criterion::new(
            "Отраслевые стандарты",
            REGULATORY,
            ScoreTriple::new(9, 8, 5),
            "Требования к сертификации и соответствию отраслевым нормам (например, PCI DSS, HIPAA).",
        ),
        Criterion::new(
            "Физическая безопасность",
            REGULATORY,
            ScoreTriple::new(5, 4, 3),
            "Насколько важно физическое расположение серверов и меры их защиты.",
        ),
        Criterion::new(
            "Объём данных",
            TECHNICAL,
            ScoreTriple::default(),
            "Объём хранимых и обрабатываемых данных (Малый, Средний, Большой).",
        )
        .with_special(SpecialScale {
            key: "sdata".to_string(),
            prompt: "Укажите объем данных:".to_string(),
            options: vec![
                SpecialOption::new(
                    "Малый",
                    "до 100 ГБ данных (несколько таблиц, тысячи-миллионы записей)",
                    ScoreTriple::new(8, 7, 9),
                ),
                SpecialOption::new(
                    "Средний",
                    "от 100 ГБ до 1 ТБ (множество таблиц, миллионы-миллиарды записей)",
                    ScoreTriple::new(6, 8, 9),
                ),
                SpecialOption::new(
                    "Большой",
                    "более 1 ТБ (сложная структура, миллиарды записей и выше)",
                    ScoreTriple::new(4, 8, 9),
                ),
            ],
        }),
        Criterion::new(
            "Латентность",
            TECHNICAL,
            ScoreTriple::new(8, 6, 5),
            "Требования к задержкам при доступе к данным.",
        ),
        Criterion::new(
            "Вариативность нагрузки",
            TECHNICAL,
            ScoreTriple::new(9, 8, 8),
            "Насколько часто и сильно меняется нагрузка на БД.",
        ),
        Criterion::new(
            "Начальные инвестиции",
            ECONOMIC,
            ScoreTriple::new(3, 4, 8),
            "Бюджет на первоначальное развертывание (оборудование, лицензии).",
        ),
        Criterion::new(
            "Постоянные затраты",
            ECONOMIC,
            ScoreTriple::new(7, 8, 9),
            "Регулярные расходы на поддержку, лицензии, электричество, персонал.",
        ),
        Criterion::new(
            "Срок использования",
            ECONOMIC,
            ScoreTriple::default(),
            "Планируемый срок эксплуатации системы (Краткосрочный, Долгосрочный).",
        )
        .with_special(SpecialScale {
            key: "susage".to_string(),
            prompt: "Укажите планируемый срок использования:".to_string(),
            options: vec![
                SpecialOption::new(
                    "Краткосрочный",
                    "до 1-2 лет (временные проекты, эксперименты)",
                    ScoreTriple::new(4, 6, 9),
                ),
                SpecialOption::new(
                    "Долгосрочный",
                    "от 3 лет и более (постоянные, долгосрочные системы)",
                    ScoreTriple::new(9, 7, 6),
                ),
            ],
        }),
        Criterion::new(
            "Квалификация персонала",
            ORGANIZATIONAL,
            ScoreTriple::new(7, 8, 9),
            "Наличие и уровень экспертизы команды по управлению БД и инфраструктурой.",
        ),
        Criterion::new(
            "Время до запуска",
            ORGANIZATIONAL,
            ScoreTriple::new(8, 9, 9),
            "Насколько быстро нужно развернуть систему.",
        ),
        Criterion::new(
            "Масштабируемость",
            ORGANIZATIONAL,
            ScoreTriple::new(7, 9, 9),
            "Требования к возможности быстрого увеличения или уменьшения ресурсов.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn builtin_catalog_passes_validation() {
        let criteria = CriterionCatalog::builtin().criteria().to_vec();
        assert!(CriterionCatalog::new(criteria).is_ok());
    }

    #[test]
    fn builtin_catalog_has_twelve_criteria_in_four_categories() {
        let catalog = CriterionCatalog::builtin();
        assert_eq!(catalog.len(), 12);
        assert_eq!(catalog.categories().len(), 4);
    }

    #[test]
    fn builtin_catalog_has_two_special_criteria() {
        let catalog = CriterionCatalog::builtin();
        let special: Vec<&str> = catalog
            .criteria()
            .iter()
            .filter(|c| c.is_special())
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(special, vec!["Объём данных", "Срок использования"]);
    }

    #[test]
    fn get_returns_none_for_unknown_name() {
        assert!(CriterionCatalog::builtin().get("Нет такого").is_none());
        assert_eq!(
            CriterionCatalog::builtin().get("Латентность").unwrap().base_scores,
            ScoreTriple::new(8, 6, 5)
        );
    }

    #[test]
    fn index_of_and_get_by_index_agree() {
        let catalog = CriterionCatalog::builtin();
        let index = catalog.index_of("Масштабируемость").unwrap();
        assert_eq!(catalog.get_by_index(index).unwrap().name, "Масштабируемость");
        assert!(catalog.get_by_index(catalog.len()).is_none());
    }

    #[test]
    fn special_by_key_finds_scale() {
        let (criterion, scale) = CriterionCatalog::builtin().special_by_key("susage").unwrap();
        assert_eq!(criterion.name, "Срок использования");
        assert_eq!(scale.options.len(), 2);
        assert!(CriterionCatalog::builtin().special_by_key("sother").is_none());
    }

    #[test]
    fn new_rejects_duplicate_names() {
        let c = Criterion::new("A", "X", ScoreTriple::default(), "");
        let result = CriterionCatalog::new(vec![c.clone(), c]);
        assert_eq!(result.unwrap_err(), CatalogError::DuplicateName("A".to_string()));
    }

    #[test]
    fn new_rejects_empty_catalog() {
        assert_eq!(CriterionCatalog::new(vec![]).unwrap_err(), CatalogError::Empty);
    }

    #[test]
    fn new_rejects_reserved_special_key() {
        let c = Criterion::new("A", "X", ScoreTriple::default(), "").with_special(SpecialScale {
            key: "prio".to_string(),
            prompt: String::new(),
            options: vec![SpecialOption::new("x", "", ScoreTriple::neutral())],
        });
        assert!(matches!(
            CriterionCatalog::new(vec![c]),
            Err(CatalogError::InvalidSpecialKey { .. })
        ));
    }

    #[test]
    fn new_rejects_scale_without_options() {
        let c = Criterion::new("A", "X", ScoreTriple::default(), "").with_special(SpecialScale {
            key: "sa".to_string(),
            prompt: String::new(),
            options: vec![],
        });
        assert_eq!(
            CriterionCatalog::new(vec![c]).unwrap_err(),
            CatalogError::EmptyScale("A".to_string())
        );
    }

    #[test]
    fn from_yaml_str_parses_criteria() {
        let yaml = r#"
criteria:
  - name: Latency
    category: Technical
    base_scores: { on_prem: 8, private: 6, public: 5 }
  - name: Volume
    category: Technical
    base_scores: { on_prem: 0, private: 0, public: 0 }
    special:
      key: svol
      prompt: "How much data?"
      options:
        - { label: Small, scores: { on_prem: 8, private: 7, public: 9 } }
"#;
        let catalog = CriterionCatalog::from_yaml_str(yaml).unwrap();
        assert_eq!(catalog.len(), 2);
        assert!(catalog.get("Volume").unwrap().is_special());
        assert_eq!(catalog.get("Latency").unwrap().description, "");
    }

    #[test]
    fn from_yaml_str_reports_parse_errors() {
        assert!(matches!(
            CriterionCatalog::from_yaml_str("criteria: 12"),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn from_path_loads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "criteria:\n  - name: Only\n    category: C\n    base_scores: {{ on_prem: 1, private: 2, public: 3 }}"
        )
        .unwrap();

        let catalog = CriterionCatalog::from_path(file.path()).unwrap();
        assert_eq!(catalog.get_by_index(0).unwrap().name, "Only");
    }

    #[test]
    fn from_path_reports_missing_file() {
        assert!(matches!(
            CriterionCatalog::from_path("/nonexistent/catalog.yaml"),
            Err(CatalogError::Read { .. })
        ));
    }
}
