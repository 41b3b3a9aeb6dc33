use crate::models::animal::{Animal, LifeStage, Sex};

/// Listing filter for the animals view. Free text matches name, breed and
/// the status label, case-insensitively; the facets compose with AND. The
/// species facet mirrors the primary species filter the backend serves.
#[derive(Debug, Clone, Default)]
pub struct AnimalFilter {
    pub text: String,
    pub sex: Option<Sex>,
    pub life_stage: Option<LifeStage>,
    pub species: Option<String>,
}

impl AnimalFilter {
    fn matches(&self, animal: &Animal) -> bool {
        let needle = self.text.trim().to_lowercase();
        let text_ok = needle.is_empty()
            || animal.name.to_lowercase().contains(&needle)
            || animal.breed.to_lowercase().contains(&needle)
            || animal.status.label().to_lowercase().contains(&needle);
        text_ok
            && self.sex.is_none_or(|sex| animal.sex == sex)
            && self
                .life_stage
                .is_none_or(|stage| animal.life_stage() == stage)
            && self
                .species
                .as_deref()
                .is_none_or(|species| animal.species.eq_ignore_ascii_case(species))
    }
}

pub fn filter_animals(animals: &[Animal], filter: &AnimalFilter) -> Vec<Animal> {
    animals
        .iter()
        .filter(|animal| filter.matches(animal))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::animal::{AgeUnit, AnimalStatus};

    fn animal(id: i64, name: &str, breed: &str, sex: Sex, age: u32, unit: AgeUnit) -> Animal {
        Animal {
            id,
            name: name.to_string(),
            species: "Perro".to_string(),
            breed: breed.to_string(),
            sex,
            age_value: age,
            age_unit: unit,
            status: AnimalStatus::Available,
            image_url: None,
        }
    }

    #[test]
    fn text_matches_name_breed_and_status_label() {
        let animals = vec![
            animal(1, "Luna", "Podenco", Sex::Female, 3, AgeUnit::Years),
            animal(2, "Rocky", "Mestizo", Sex::Male, 5, AgeUnit::Years),
        ];
        let by_name = filter_animals(&animals, &AnimalFilter { text: "luNA".into(), ..Default::default() });
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].id, 1);

        let by_breed = filter_animals(&animals, &AnimalFilter { text: "mesti".into(), ..Default::default() });
        assert_eq!(by_breed.len(), 1);
        assert_eq!(by_breed[0].id, 2);

        // "Disponible" is the status label of both.
        let by_status = filter_animals(&animals, &AnimalFilter { text: "disponible".into(), ..Default::default() });
        assert_eq!(by_status.len(), 2);
    }

    #[test]
    fn facets_compose_with_and_semantics() {
        let animals = vec![
            animal(1, "Luna", "Podenco", Sex::Female, 10, AgeUnit::Months),
            animal(2, "Nala", "Podenco", Sex::Female, 12, AgeUnit::Years),
            animal(3, "Rocky", "Podenco", Sex::Male, 6, AgeUnit::Months),
        ];
        let filter = AnimalFilter {
            text: "podenco".into(),
            sex: Some(Sex::Female),
            life_stage: Some(LifeStage::Young),
            species: None,
        };
        let matched = filter_animals(&animals, &filter);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].id, 1);
    }

    #[test]
    fn empty_filter_keeps_everything() {
        let animals = vec![animal(1, "Luna", "Podenco", Sex::Female, 3, AgeUnit::Years)];
        assert_eq!(filter_animals(&animals, &AnimalFilter::default()).len(), 1);
    }
}
