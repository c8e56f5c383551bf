//! Survey session store and its transitions
//!
//! The answer map is the single source of truth for form values. Structural
//! transitions (monitoring type, lot, phase, arthropod class, species) purge
//! the answers of the branch they leave, so every unit-scoped key left in the
//! map is reachable from the current selection path.

use rand::Rng;

use crate::domain::a001_questionnaire::{CharacterizationFieldKind, FormTemplate};
use crate::domain::a002_sampling_unit::{PhasePolicy, PlantGenerator, Planta, PlantaFenologica};
use crate::domain::a004_phenology::Phase;
use crate::domain::a005_arthropod::{ArthropodClass, InsectSpecies, MiteSpecies};
use crate::enums::MonitoringType;
use crate::shared::answer_map::AnswerMap;
use crate::shared::field_key::{is_monitoring_scoped, prefix, FieldKey, MONITORING_PREFIXES};
use crate::shared::metadata::{FieldBinding, FieldSpec};
use crate::shared::storage::{load_json, save_json, StateStorage};

pub const KEY_TEMPLATE_ID: &str = "encuesta_formularioId";
pub const KEY_PARTICIPANT_TYPE: &str = "encuesta_tipoParticipante";
pub const KEY_ANSWERS: &str = "encuesta_caracterizacion";
pub const KEY_LOT: &str = "encuesta_loteSeleccionado";
pub const KEY_UNITS: &str = "encuesta_plantasSeleccionadas";
pub const KEY_PHENOLOGY_UNITS: &str = "encuesta_plantasFenologico";

const PERSISTED_KEYS: [&str; 6] = [
    KEY_TEMPLATE_ID,
    KEY_PARTICIPANT_TYPE,
    KEY_ANSWERS,
    KEY_LOT,
    KEY_UNITS,
    KEY_PHENOLOGY_UNITS,
];

/// Random source plus phase policy used whenever units are (re)generated
pub struct Sampler<R: Rng> {
    generator: PlantGenerator<R>,
    policy: PhasePolicy,
}

impl<R: Rng> Sampler<R> {
    pub fn new(rng: R, policy: PhasePolicy) -> Self {
        Self {
            generator: PlantGenerator::new(rng),
            policy,
        }
    }

    fn draw(&mut self) -> (Vec<Planta>, Vec<PlantaFenologica>) {
        let plants = self.generator.sample();
        let phenology = self.generator.assign_phases(&plants, self.policy);
        (plants, phenology)
    }
}

/// A change coming from one rendered input
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// New value of a text, number, select or photo input
    Set(String),
    /// One option of a checklist was (un)checked
    Toggle { value: String, checked: bool },
}

/// Arthropod selection of one unit, read back from the answer map
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArthropodUnitState {
    pub classes: Vec<ArthropodClass>,
    pub insect: Option<InsectSpecies>,
    pub mite: Option<MiteSpecies>,
}

impl ArthropodUnitState {
    pub fn read(answers: &AnswerMap, unit: usize) -> Self {
        let classes = answers
            .field(FieldKey::ArthropodClasses { unit })
            .map(ArthropodClass::parse_list)
            .unwrap_or_default();
        let insect = answers
            .field(FieldKey::InsectSpecies { unit })
            .and_then(InsectSpecies::from_code);
        let mite = answers
            .field(FieldKey::MiteSpecies { unit })
            .and_then(MiteSpecies::from_code);

        Self {
            classes,
            insect,
            mite,
        }
    }

    pub fn has(&self, class: ArthropodClass) -> bool {
        self.classes.contains(&class)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurveySession {
    pub template_id: Option<String>,
    pub participant_type: Option<String>,
    pub answers: AnswerMap,
    pub lot: Option<String>,
    pub units: Vec<Planta>,
    pub phenology_units: Vec<PlantaFenologica>,
}

impl SurveySession {
    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Restore the session; corrupt entries fall back to their defaults
    pub fn load(storage: &dyn StateStorage) -> Self {
        let mut session = Self {
            template_id: load_json::<Option<String>>(storage, KEY_TEMPLATE_ID).flatten(),
            participant_type: load_json::<Option<String>>(storage, KEY_PARTICIPANT_TYPE).flatten(),
            answers: load_json(storage, KEY_ANSWERS).unwrap_or_default(),
            lot: load_json::<Option<String>>(storage, KEY_LOT).flatten(),
            units: load_json(storage, KEY_UNITS).unwrap_or_default(),
            phenology_units: load_json(storage, KEY_PHENOLOGY_UNITS).unwrap_or_default(),
        };

        if session.phenology_units.len() != session.units.len() {
            log::warn!("Phenology units out of sync with sampled plants, rebuilding");
            session.phenology_units = session
                .units
                .iter()
                .cloned()
                .map(PlantaFenologica::unassigned)
                .collect();
        }
        session
    }

    /// `load`, then regenerate units lost with a dropped entry
    pub fn restore<R: Rng>(storage: &dyn StateStorage, sampler: &mut Sampler<R>) -> Self {
        let mut session = Self::load(storage);
        let had_units = !session.units.is_empty();
        session.ensure_units(sampler);
        if !had_units && !session.units.is_empty() {
            session.save(storage);
        }
        session
    }

    pub fn save(&self, storage: &dyn StateStorage) {
        save_json(storage, KEY_TEMPLATE_ID, &self.template_id);
        save_json(storage, KEY_PARTICIPANT_TYPE, &self.participant_type);
        save_json(storage, KEY_ANSWERS, &self.answers);
        save_json(storage, KEY_LOT, &self.lot);
        save_json(storage, KEY_UNITS, &self.units);
        save_json(storage, KEY_PHENOLOGY_UNITS, &self.phenology_units);
    }

    /// Forget everything, in memory and in storage
    pub fn reset(&mut self, storage: &dyn StateStorage) {
        *self = Self::default();
        for key in PERSISTED_KEYS {
            storage.remove_item(key);
        }
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn template<'a>(&self, templates: &'a [FormTemplate]) -> Option<&'a FormTemplate> {
        let id = self.template_id.as_deref()?;
        FormTemplate::find(templates, id)
    }

    /// Monitoring type chosen in the characterization section
    pub fn monitoring_type(&self) -> Option<MonitoringType> {
        self.answers
            .iter()
            .filter(|(key, _)| !is_monitoring_scoped(key))
            .find(|(key, _)| {
                CharacterizationFieldKind::classify(key) == CharacterizationFieldKind::MonitoringType
            })
            .and_then(|(_, value)| MonitoringType::from_code(value))
    }

    fn needs_units(&self) -> bool {
        self.monitoring_type()
            .is_some_and(|t| t.requires_sampling_units())
    }

    pub fn phase(&self, unit: usize) -> Phase {
        unit.checked_sub(1)
            .and_then(|i| self.phenology_units.get(i))
            .map(|u| u.fase)
            .unwrap_or_default()
    }

    pub fn arthropod_unit(&self, unit: usize) -> ArthropodUnitState {
        ArthropodUnitState::read(&self.answers, unit)
    }

    /// Current value of a rendered field, wherever the session keeps it
    pub fn binding_value(&self, field: &FieldSpec) -> String {
        match field.binding {
            FieldBinding::Lot => self.lot.clone().unwrap_or_default(),
            FieldBinding::Phase { unit } => self.phase(unit).code().to_string(),
            _ => self.answers.value(&field.key).to_string(),
        }
    }

    // ------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------

    /// Choose a questionnaire; a different one starts a fresh session
    pub fn select_template(&mut self, template: &FormTemplate) {
        if self.template_id.as_deref() == Some(template.id.as_str()) {
            return;
        }
        log::debug!("Selected questionnaire '{}'", template.id);
        *self = Self {
            template_id: Some(template.id.clone()),
            participant_type: Some(template.participant_type().to_string()),
            ..Self::default()
        };
    }

    pub fn clear_template(&mut self) {
        *self = Self::default();
    }

    /// Plain answer merge
    pub fn set_answer(&mut self, key: &str, value: impl Into<String>) {
        self.answers.set(key, value);
    }

    /// Characterization answer; routes the monitoring field to its transition
    pub fn set_characterization<R: Rng>(&mut self, field: &str, value: &str, sampler: &mut Sampler<R>) {
        match CharacterizationFieldKind::classify(field) {
            CharacterizationFieldKind::MonitoringType => {
                self.change_monitoring_type(field, value, sampler)
            }
            _ => self.set_answer(field, value),
        }
    }

    pub fn change_monitoring_type<R: Rng>(
        &mut self,
        field: &str,
        code: &str,
        sampler: &mut Sampler<R>,
    ) {
        let previous = self.monitoring_type();
        self.answers.set(field, code);
        let next = self.monitoring_type();
        if previous == next {
            return;
        }

        log::debug!("Monitoring type {:?} -> {:?}", previous, next);
        self.drop_units();
        self.ensure_units(sampler);
    }

    pub fn select_lot<R: Rng>(&mut self, code: &str, sampler: &mut Sampler<R>) {
        let next = Some(code.trim()).filter(|c| !c.is_empty()).map(String::from);
        if next == self.lot {
            self.ensure_units(sampler);
            return;
        }

        log::debug!("Lot {:?} -> {:?}", self.lot, next);
        self.lot = next;
        self.drop_units();
        self.ensure_units(sampler);
    }

    /// Change the phase of phenology unit `unit`, purging its answers
    pub fn set_phase(&mut self, unit: usize, phase: Phase) {
        let Some(target) = unit.checked_sub(1).and_then(|i| self.phenology_units.get_mut(i)) else {
            log::warn!("Phase change for unknown unit {}", unit);
            return;
        };
        if target.fase == phase {
            return;
        }
        target.fase = phase;
        self.answers.remove_prefix(&prefix::phenology_unit(unit));
    }

    pub fn toggle_class(&mut self, unit: usize, class: ArthropodClass, checked: bool) {
        let key = FieldKey::ArthropodClasses { unit }.key();
        let mut classes = ArthropodClass::parse_list(self.answers.value(&key));

        if checked {
            if !classes.contains(&class) {
                classes.push(class);
                classes.sort();
            }
        } else {
            classes.retain(|c| *c != class);
            self.answers.remove_prefix(&prefix::class(unit, class));
        }

        if classes.is_empty() {
            self.answers.remove(&key);
        } else {
            let joined = classes.iter().map(|c| c.code()).collect::<Vec<_>>().join(",");
            self.answers.set(key, joined);
        }
    }

    /// Replace the class set of a unit with the comma-joined `raw` list
    pub fn set_classes(&mut self, unit: usize, raw: &str) {
        let wanted = ArthropodClass::parse_list(raw);
        for class in ArthropodClass::all() {
            self.toggle_class(unit, *class, wanted.contains(class));
        }
    }

    pub fn select_insect(&mut self, unit: usize, species: Option<InsectSpecies>) {
        let state = self.arthropod_unit(unit);
        if !state.has(ArthropodClass::Insecto) {
            log::warn!("Insect species chosen on unit {} without the insect class", unit);
            return;
        }
        if state.insect == species {
            return;
        }
        if let Some(previous) = state.insect {
            self.answers.remove_prefix(&prefix::insect_species(unit, previous));
        }

        let key = FieldKey::InsectSpecies { unit }.key();
        match species {
            Some(s) => self.answers.set(key, s.code()),
            None => {
                self.answers.remove(&key);
            }
        }
    }

    pub fn select_mite(&mut self, unit: usize, species: Option<MiteSpecies>) {
        let state = self.arthropod_unit(unit);
        if !state.has(ArthropodClass::Aracnido) {
            log::warn!("Mite species chosen on unit {} without the arachnid class", unit);
            return;
        }
        if state.mite == species {
            return;
        }
        if let Some(previous) = state.mite {
            self.answers.remove_prefix(&prefix::mite_species(unit, previous));
        }

        let key = FieldKey::MiteSpecies { unit }.key();
        match species {
            Some(s) => self.answers.set(key, s.code()),
            None => {
                self.answers.remove(&key);
            }
        }
    }

    /// Check or uncheck one option of a comma-joined checklist answer
    pub fn toggle_choice(&mut self, key: &str, value: &str, checked: bool) {
        let mut values: Vec<String> = self
            .answers
            .value(key)
            .split(',')
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(String::from)
            .collect();

        if checked {
            if !values.iter().any(|v| v == value) {
                values.push(value.to_string());
            }
        } else {
            values.retain(|v| v != value);
        }

        self.answers.set(key, values.join(","));
    }

    /// Route an input event of a rendered field to its transition
    pub fn apply_input<R: Rng>(
        &mut self,
        key: &str,
        binding: FieldBinding,
        event: InputEvent,
        sampler: &mut Sampler<R>,
    ) {
        match (binding, event) {
            (FieldBinding::Answer, InputEvent::Set(value)) => self.set_answer(key, value),
            (FieldBinding::Answer, InputEvent::Toggle { value, checked }) => {
                self.toggle_choice(key, &value, checked)
            }
            (FieldBinding::MonitoringType, InputEvent::Set(value)) => {
                self.change_monitoring_type(key, &value, sampler)
            }
            (FieldBinding::Lot, InputEvent::Set(value)) => self.select_lot(&value, sampler),
            (FieldBinding::Phase { unit }, InputEvent::Set(value)) => {
                self.set_phase(unit, Phase::from_code(&value))
            }
            (FieldBinding::ArthropodClasses { unit }, InputEvent::Toggle { value, checked }) => {
                match ArthropodClass::from_code(&value) {
                    Some(class) => self.toggle_class(unit, class, checked),
                    None => log::warn!("Unknown arthropod class '{}'", value),
                }
            }
            (FieldBinding::ArthropodClasses { unit }, InputEvent::Set(value)) => {
                self.set_classes(unit, &value)
            }
            (FieldBinding::InsectSpecies { unit }, InputEvent::Set(value)) => {
                self.select_insect(unit, InsectSpecies::from_code(&value))
            }
            (FieldBinding::MiteSpecies { unit }, InputEvent::Set(value)) => {
                self.select_mite(unit, MiteSpecies::from_code(&value))
            }
            (binding, event) => {
                log::warn!("Ignoring {:?} on '{}' ({})", event, key, binding.as_str())
            }
        }
    }

    fn drop_units(&mut self) {
        for p in MONITORING_PREFIXES {
            self.answers.remove_prefix(p);
        }
        self.units.clear();
        self.phenology_units.clear();
    }

    /// Generate the sampled plants when the selection path needs them and none exist
    pub fn ensure_units<R: Rng>(&mut self, sampler: &mut Sampler<R>) {
        if !self.needs_units() || self.lot.is_none() || !self.units.is_empty() {
            return;
        }
        let (units, phenology_units) = sampler.draw();
        log::info!(
            "Sampled {} plants for lot {}",
            units.len(),
            self.lot.as_deref().unwrap_or_default()
        );
        self.units = units;
        self.phenology_units = phenology_units;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_questionnaire::CharacterizationTemplate;
    use crate::domain::a002_sampling_unit::SAMPLE_SIZE;
    use crate::domain::a003_census::CensusAttr;
    use crate::domain::a004_phenology::PhenologyAttr;
    use crate::domain::a005_arthropod::ArthropodAttr;
    use crate::shared::storage::MemoryStorage;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const MONITORING_FIELD: &str = "¿Qué se va a monitorear?";

    fn sampler() -> Sampler<StdRng> {
        Sampler::new(StdRng::seed_from_u64(11), PhasePolicy::UserAssigned)
    }

    fn template(id: &str) -> FormTemplate {
        FormTemplate {
            id: id.into(),
            caracterizacion_template: CharacterizationTemplate {
                campos_requeridos: vec!["Nombre".into(), MONITORING_FIELD.into()],
                tipo_participante: "Técnico".into(),
            },
            censo: Default::default(),
            fenologico: Default::default(),
        }
    }

    fn session_with(kind: &str) -> (SurveySession, Sampler<StdRng>) {
        let mut s = sampler();
        let mut session = SurveySession::default();
        session.select_template(&template("f1"));
        session.set_characterization(MONITORING_FIELD, kind, &mut s);
        session.select_lot("l3", &mut s);
        (session, s)
    }

    #[test]
    fn test_select_template_resets_and_records_participant() {
        let mut session = SurveySession::default();
        session.set_answer("Nombre", "Ana");
        session.select_template(&template("f1"));
        assert_eq!(session.template_id.as_deref(), Some("f1"));
        assert_eq!(session.participant_type.as_deref(), Some("Técnico"));
        assert!(session.answers.is_empty());

        session.set_answer("Nombre", "Ana");
        session.select_template(&template("f1"));
        assert_eq!(session.answers.value("Nombre"), "Ana");

        session.select_template(&template("f2"));
        assert!(session.answers.is_empty());
    }

    #[test]
    fn test_units_generated_once_for_plant_level_types() {
        let (session, _) = session_with("poblacion");
        assert_eq!(session.monitoring_type(), Some(MonitoringType::Poblacion));
        assert_eq!(session.units.len(), SAMPLE_SIZE);
        assert_eq!(session.phenology_units.len(), SAMPLE_SIZE);

        let mut s = sampler();
        let mut other = SurveySession::default();
        other.set_characterization(MONITORING_FIELD, "arvenses", &mut s);
        other.select_lot("l3", &mut s);
        assert!(other.units.is_empty());
    }

    #[test]
    fn test_units_survive_plain_answers() {
        let (mut session, mut s) = session_with("poblacion");
        let before = session.units.clone();
        session.set_answer("Nombre", "Ana");
        session.ensure_units(&mut s);
        assert_eq!(session.units, before);
    }

    #[test]
    fn test_changing_type_purges_every_branch() {
        let (mut session, mut s) = session_with("poblacion");
        session.set_answer(
            &FieldKey::Census { unit: 1, attr: CensusAttr::Altura }.key(),
            "1.5",
        );
        session.set_characterization(MONITORING_FIELD, "fenologico", &mut s);

        assert_eq!(session.answers.keys_with_prefix("censo_").count(), 0);
        assert_eq!(session.units.len(), SAMPLE_SIZE);

        session.set_characterization(MONITORING_FIELD, "arvenses", &mut s);
        assert!(session.units.is_empty());
        assert!(session
            .answers
            .iter()
            .all(|(k, _)| !is_monitoring_scoped(k)));
    }

    #[test]
    fn test_type_select_then_deselect_leaves_no_residue() {
        let (mut session, mut s) = session_with("artropodos");
        session.toggle_class(2, ArthropodClass::Insecto, true);
        session.select_insect(2, Some(InsectSpecies::Compsus));
        session.set_answer(
            &FieldKey::Insect {
                unit: 2,
                species: InsectSpecies::Compsus,
                attr: ArthropodAttr::Adultos,
            }
            .key(),
            "4",
        );

        session.set_characterization(MONITORING_FIELD, "", &mut s);
        assert_eq!(session.answers.keys_with_prefix("artropodo_").count(), 0);
        assert!(session.units.is_empty());
    }

    #[test]
    fn test_changing_lot_regenerates_units() {
        let (mut session, mut s) = session_with("poblacion");
        let key = FieldKey::Census { unit: 3, attr: CensusAttr::Observacion }.key();
        session.set_answer(&key, "Buena");

        session.select_lot("l3", &mut s);
        assert!(session.answers.is_filled(&key));

        session.select_lot("l5", &mut s);
        assert_eq!(session.lot.as_deref(), Some("l5"));
        assert!(!session.answers.is_filled(&key));
        assert_eq!(session.units.len(), SAMPLE_SIZE);
    }

    #[test]
    fn test_phase_change_purges_only_that_unit() {
        let (mut session, _) = session_with("fenologico");
        session.set_phase(1, Phase::Floracion);
        session.set_phase(2, Phase::Floracion);
        let unit1 = FieldKey::Phenology { unit: 1, attr: PhenologyAttr::TotalFlores }.key();
        let unit2 = FieldKey::Phenology { unit: 2, attr: PhenologyAttr::TotalFlores }.key();
        session.set_answer(&unit1, "30");
        session.set_answer(&unit2, "12");

        session.set_phase(1, Phase::Floracion);
        assert!(session.answers.is_filled(&unit1));

        session.set_phase(1, Phase::Vegetativa);
        assert!(!session.answers.is_filled(&unit1));
        assert!(session.answers.is_filled(&unit2));
        assert_eq!(session.phase(1), Phase::Vegetativa);
        assert_eq!(session.phase(9), Phase::Unset);
    }

    #[test]
    fn test_unchecking_arachnid_purges_mite_keys() {
        let (mut session, _) = session_with("artropodos");
        session.toggle_class(3, ArthropodClass::Aracnido, true);
        session.select_mite(3, Some(MiteSpecies::Phyllocoptruta));
        session.set_answer(
            &FieldKey::Mite {
                unit: 3,
                species: MiteSpecies::Phyllocoptruta,
                attr: ArthropodAttr::HojasFrutosAfectados,
            }
            .key(),
            "2",
        );

        session.toggle_class(3, ArthropodClass::Aracnido, false);
        assert_eq!(
            session
                .answers
                .keys_with_prefix(&prefix::class(3, ArthropodClass::Aracnido))
                .count(),
            0
        );
        assert!(session.answers.get("artropodo_planta_3_clases").is_none());
        assert_eq!(session.arthropod_unit(3), ArthropodUnitState::default());
    }

    #[test]
    fn test_species_change_purges_previous_species_only() {
        let (mut session, _) = session_with("artropodos");
        session.toggle_class(1, ArthropodClass::Insecto, true);
        session.select_insect(1, Some(InsectSpecies::Otro));
        let name = FieldKey::Insect {
            unit: 1,
            species: InsectSpecies::Otro,
            attr: ArthropodAttr::NombreInsecto,
        }
        .key();
        session.set_answer(&name, "Trips");

        session.select_insect(1, Some(InsectSpecies::Otro));
        assert!(session.answers.is_filled(&name));

        session.select_insect(1, Some(InsectSpecies::Hormiga));
        assert!(!session.answers.is_filled(&name));
        assert_eq!(session.arthropod_unit(1).insect, Some(InsectSpecies::Hormiga));
    }

    #[test]
    fn test_species_ignored_without_class() {
        let (mut session, _) = session_with("artropodos");
        session.select_mite(4, Some(MiteSpecies::Polyphagotarsonemus));
        assert!(session.answers.field(FieldKey::MiteSpecies { unit: 4 }).is_none());
    }

    #[test]
    fn test_toggle_choice_keeps_order_and_dedupes() {
        let mut session = SurveySession::default();
        session.toggle_choice("estados", "Huevo", true);
        session.toggle_choice("estados", "Adulto", true);
        session.toggle_choice("estados", "Huevo", true);
        assert_eq!(session.answers.value("estados"), "Huevo,Adulto");
        session.toggle_choice("estados", "Huevo", false);
        assert_eq!(session.answers.value("estados"), "Adulto");
    }

    #[test]
    fn test_apply_input_routes_bindings() {
        let (mut session, mut s) = session_with("artropodos");
        session.apply_input(
            "artropodo_planta_2_clases",
            FieldBinding::ArthropodClasses { unit: 2 },
            InputEvent::Toggle {
                value: "insecto".into(),
                checked: true,
            },
            &mut s,
        );
        session.apply_input(
            "artropodo_planta_2_insecto_tipo",
            FieldBinding::InsectSpecies { unit: 2 },
            InputEvent::Set("diaphorina".into()),
            &mut s,
        );
        assert_eq!(session.arthropod_unit(2).insect, Some(InsectSpecies::Diaphorina));

        session.apply_input("lote", FieldBinding::Lot, InputEvent::Set("l7".into()), &mut s);
        assert_eq!(session.lot.as_deref(), Some("l7"));
        assert_eq!(session.arthropod_unit(2), ArthropodUnitState::default());
    }

    #[test]
    fn test_persistence_round_trip() {
        let storage = MemoryStorage::new();
        let (mut session, _) = session_with("fenologico");
        session.set_phase(2, Phase::Fructificacion);
        session.save(&storage);

        let restored = SurveySession::load(&storage);
        assert_eq!(restored, session);

        session.reset(&storage);
        assert_eq!(session, SurveySession::default());
        assert!(storage.is_empty());
    }

    #[test]
    fn test_restore_regenerates_units_dropped_from_storage() {
        let storage = MemoryStorage::new();
        storage.set_item(KEY_TEMPLATE_ID, "\"f1\"");
        storage.set_item(KEY_LOT, "\"l3\"");
        storage.set_item(KEY_ANSWERS, r#"{"¿Qué se va a monitorear?":"poblacion"}"#);
        storage.set_item(KEY_UNITS, "[broken");

        let mut s = sampler();
        let session = SurveySession::restore(&storage, &mut s);
        assert_eq!(session.lot.as_deref(), Some("l3"));
        assert_eq!(session.units.len(), SAMPLE_SIZE);
        assert_eq!(session.phenology_units.len(), SAMPLE_SIZE);
        assert_eq!(SurveySession::load(&storage).units, session.units);
    }

    #[test]
    fn test_reselecting_lot_fills_missing_units() {
        let (mut session, mut s) = session_with("poblacion");
        session.units.clear();
        session.phenology_units.clear();

        session.select_lot("l3", &mut s);
        assert_eq!(session.units.len(), SAMPLE_SIZE);
    }

    #[test]
    fn test_reselecting_lot_keeps_existing_units() {
        let (mut session, mut s) = session_with("poblacion");
        let before = session.units.clone();
        session.select_lot("l3", &mut s);
        assert_eq!(session.units, before);
    }

    #[test]
    fn test_corrupt_storage_falls_back_to_defaults() {
        let storage = MemoryStorage::new();
        storage.set_item(KEY_TEMPLATE_ID, "\"f1\"");
        storage.set_item(KEY_ANSWERS, "{broken");
        storage.set_item(KEY_UNITS, "[]");

        let session = SurveySession::load(&storage);
        assert_eq!(session.template_id.as_deref(), Some("f1"));
        assert!(session.answers.is_empty());
        assert!(storage.get_item(KEY_ANSWERS).is_none());
    }
}
