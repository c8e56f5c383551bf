//! Builds the visible form from the session structure

use crate::domain::a001_questionnaire::{CharacterizationFieldKind, FormTemplate, DAY_CONDITION_CHOICES};
use crate::domain::a003_census::CensusAttr;
use crate::domain::a004_phenology::PHASE_CHOICES;
use crate::domain::a005_arthropod::{
    ArthropodClass, OtherArthropodAttr, CLASS_CHOICES, INSECT_CHOICES, MITE_CHOICES,
};
use crate::enums::{MonitoringType, LOT_CHOICES, MONITORING_CHOICES};
use crate::shared::field_key::FieldKey;
use crate::shared::metadata::{FieldAttribute, FieldBinding, FieldKind, FieldSpec, ValidationRules};

use super::session::SurveySession;

/// Pseudo key of the lot select; the lot lives in the session, not in the answers
pub const LOT_FIELD_KEY: &str = "lote";

#[derive(Debug, Clone, PartialEq)]
pub struct FormSection {
    pub id: String,
    pub title: String,
    pub hint: Option<String>,
    pub fields: Vec<FieldSpec>,
}

impl FormSection {
    fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            hint: None,
            fields: Vec::new(),
        }
    }

    fn with_hint(mut self, hint: Option<&str>) -> Self {
        self.hint = hint.map(str::to_string);
        self
    }

    /// Changes whenever anything shown by the section changes: title and
    /// hint carry the sampled plant, so a new lot yields new identities
    pub fn identity(&self) -> String {
        let keys: Vec<&str> = self.fields.iter().map(|f| f.key.as_str()).collect();
        format!(
            "{}|{}|{}|{}",
            self.id,
            self.title,
            self.hint.as_deref().unwrap_or_default(),
            keys.join(",")
        )
    }
}

/// Ordered sections of the form.
///
/// Depends only on the selection path (template, monitoring type, lot,
/// units, phases, classes, species), never on leaf answers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormLayout {
    pub sections: Vec<FormSection>,
}

impl FormLayout {
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.sections.iter().flat_map(|s| s.fields.iter())
    }

    pub fn field(&self, key: &str) -> Option<&FieldSpec> {
        self.fields().find(|f| f.key == key)
    }

    pub fn section(&self, id: &str) -> Option<&FormSection> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// Keys this layout may store in the answer map
    pub fn answer_keys(&self) -> impl Iterator<Item = &str> {
        self.fields()
            .filter(|f| !matches!(f.binding, FieldBinding::Lot | FieldBinding::Phase { .. }))
            .map(|f| f.key.as_str())
    }
}

pub fn render(template: Option<&FormTemplate>, session: &SurveySession) -> FormLayout {
    let Some(template) = template else {
        return FormLayout::default();
    };

    let mut layout = FormLayout {
        sections: vec![characterization_section(template)],
    };

    let Some(kind) = session.monitoring_type().filter(|t| t.requires_sampling_units()) else {
        return layout;
    };

    layout.sections.push(lot_section(kind));
    if session.lot.is_none() {
        return layout;
    }

    match kind {
        MonitoringType::Poblacion => census_sections(session, &mut layout),
        MonitoringType::Fenologico => phenology_sections(session, &mut layout),
        MonitoringType::Artropodos => arthropod_sections(session, &mut layout),
        MonitoringType::Enfermedades
        | MonitoringType::Arvenses
        | MonitoringType::Biologicos
        | MonitoringType::Polinizadores => {}
    }
    layout
}

fn characterization_section(template: &FormTemplate) -> FormSection {
    let mut section = FormSection::new("caracterizacion", "Caracterización");
    section.fields = template
        .characterization_fields()
        .map(|name| {
            let label = name.replace('_', " ");
            let key = FieldKey::Characterization(name).key();
            let field = match CharacterizationFieldKind::classify(name) {
                CharacterizationFieldKind::MonitoringType => {
                    FieldSpec::answer(key, label, FieldKind::Select(MONITORING_CHOICES))
                        .with_binding(FieldBinding::MonitoringType)
                }
                CharacterizationFieldKind::DayConditions => {
                    FieldSpec::answer(key, label, FieldKind::Select(DAY_CONDITION_CHOICES))
                }
                CharacterizationFieldKind::Text => {
                    let placeholder = format!("Ingrese {}", label);
                    FieldSpec::answer(key, label, FieldKind::Text)
                        .with_placeholder(Some(&placeholder))
                }
            };
            field.with_rules(ValidationRules::required())
        })
        .collect();
    section
}

fn lot_section(kind: MonitoringType) -> FormSection {
    let mut section = FormSection::new("lote", format!("Lote para {}", kind.display_name()));
    section.fields.push(
        FieldSpec::answer(LOT_FIELD_KEY, "Seleccione el lote", FieldKind::Select(LOT_CHOICES))
            .with_binding(FieldBinding::Lot)
            .with_rules(ValidationRules::required()),
    );
    section
}

fn unit_title(unit: usize, label: &str) -> String {
    format!("Planta {}: {}", unit, label)
}

fn census_sections(session: &SurveySession, layout: &mut FormLayout) {
    for (i, planta) in session.units.iter().enumerate() {
        let unit = i + 1;
        let mut section = FormSection::new(format!("censo_planta_{}", unit), unit_title(unit, &planta.label));
        section.fields = CensusAttr::all()
            .iter()
            .map(|attr| attr.field_spec(FieldKey::Census { unit, attr: *attr }.key()))
            .collect();
        layout.sections.push(section);
    }
}

fn phenology_sections(session: &SurveySession, layout: &mut FormLayout) {
    for (i, unit_state) in session.phenology_units.iter().enumerate() {
        let unit = i + 1;
        let mut section = FormSection::new(
            format!("fenologico_planta_{}", unit),
            unit_title(unit, &unit_state.planta.label),
        );
        section.fields.push(
            FieldSpec::answer(format!("fase_planta_{}", unit), "Fase fenológica", FieldKind::Select(PHASE_CHOICES))
                .with_binding(FieldBinding::Phase { unit })
                .with_rules(ValidationRules::required()),
        );
        section.fields.extend(
            unit_state
                .fase
                .attributes()
                .iter()
                .map(|attr| attr.field_spec(FieldKey::Phenology { unit, attr: *attr }.key())),
        );
        layout.sections.push(section);
    }
}

fn arthropod_sections(session: &SurveySession, layout: &mut FormLayout) {
    for (i, planta) in session.units.iter().enumerate() {
        let unit = i + 1;
        let state = session.arthropod_unit(unit);

        let mut section = FormSection::new(format!("artropodo_planta_{}", unit), unit_title(unit, &planta.label));
        section.fields.push(
            FieldSpec::answer(
                FieldKey::ArthropodClasses { unit }.key(),
                "¿Clase de artrópodo observado?",
                FieldKind::Checklist(CLASS_CHOICES),
            )
            .with_binding(FieldBinding::ArthropodClasses { unit }),
        );
        layout.sections.push(section);

        if state.has(ArthropodClass::Insecto) {
            let mut insect = FormSection::new(
                format!("artropodo_planta_{}_insecto", unit),
                format!("Planta {}: Insecto", unit),
            )
            .with_hint(state.insect.and_then(|s| s.instructions()));
            insect.fields.push(
                FieldSpec::answer(
                    FieldKey::InsectSpecies { unit }.key(),
                    "Seleccione el insecto observado en campo",
                    FieldKind::Select(INSECT_CHOICES),
                )
                .with_binding(FieldBinding::InsectSpecies { unit })
                .with_rules(ValidationRules::required()),
            );
            if let Some(species) = state.insect {
                insect.fields.extend(species.attributes().iter().map(|attr| {
                    attr.field_spec(
                        FieldKey::Insect {
                            unit,
                            species,
                            attr: *attr,
                        }
                        .key(),
                    )
                }));
            }
            layout.sections.push(insect);
        }

        if state.has(ArthropodClass::Aracnido) {
            let mut mite = FormSection::new(
                format!("artropodo_planta_{}_acaro", unit),
                format!("Planta {}: Ácaros", unit),
            )
            .with_hint(state.mite.and_then(|s| s.instructions()));
            mite.fields.push(
                FieldSpec::answer(
                    FieldKey::MiteSpecies { unit }.key(),
                    "Seleccione el ácaro que ocasionó el daño observado en campo",
                    FieldKind::Select(MITE_CHOICES),
                )
                .with_binding(FieldBinding::MiteSpecies { unit })
                .with_rules(ValidationRules::required()),
            );
            if let Some(species) = state.mite {
                mite.fields.extend(species.attributes().iter().map(|attr| {
                    attr.field_spec(
                        FieldKey::Mite {
                            unit,
                            species,
                            attr: *attr,
                        }
                        .key(),
                    )
                }));
            }
            layout.sections.push(mite);
        }
    }

    let mut other = FormSection::new("artropodo_otro", "Otro artrópodo");
    other.fields = OtherArthropodAttr::all()
        .iter()
        .map(|attr| attr.field_spec(FieldKey::OtherArthropod(*attr).key()))
        .collect();
    layout.sections.push(other);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_questionnaire::CharacterizationTemplate;
    use crate::domain::a002_sampling_unit::{PhasePolicy, Planta, PlantaFenologica, SAMPLE_SIZE};
    use crate::domain::a004_phenology::Phase;
    use crate::domain::a005_arthropod::{InsectSpecies, MiteSpecies};
    use crate::shared::field_key::is_unit_scoped;
    use crate::usecases::u501_field_survey::session::Sampler;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const MONITORING_FIELD: &str = "¿Qué se va a monitorear?";

    fn template() -> FormTemplate {
        FormTemplate {
            id: "f1".into(),
            caracterizacion_template: CharacterizationTemplate {
                campos_requeridos: vec![
                    "Nombre_del_tecnico".into(),
                    "Lote a monitorear".into(),
                    MONITORING_FIELD.into(),
                    "Condiciones del día".into(),
                ],
                tipo_participante: "Técnico".into(),
            },
            censo: Default::default(),
            fenologico: Default::default(),
        }
    }

    fn session(kind: &str) -> (SurveySession, Sampler<StdRng>) {
        let mut sampler = Sampler::new(StdRng::seed_from_u64(5), PhasePolicy::UserAssigned);
        let mut session = SurveySession::default();
        session.select_template(&template());
        session.set_characterization(MONITORING_FIELD, kind, &mut sampler);
        session.select_lot("l3", &mut sampler);
        (session, sampler)
    }

    /// Every unit-scoped answer must be reachable through the layout
    fn assert_reachable(session: &SurveySession) {
        let t = template();
        let layout = render(Some(&t), session);
        let reachable: Vec<&str> = layout.answer_keys().collect();
        for (key, _) in session.answers.iter() {
            if is_unit_scoped(key) {
                assert!(reachable.contains(&key), "unreachable key {}", key);
            }
        }
    }

    #[test]
    fn test_no_template_renders_nothing() {
        assert!(render(None, &SurveySession::default()).is_empty());
    }

    #[test]
    fn test_characterization_fields() {
        let t = template();
        let layout = render(Some(&t), &SurveySession::default());
        let section = layout.section("caracterizacion").unwrap();
        let keys: Vec<_> = section.fields.iter().map(|f| f.key.as_str()).collect();
        assert_eq!(keys, vec!["Nombre_del_tecnico", MONITORING_FIELD, "Condiciones del día"]);

        assert_eq!(section.fields[0].label, "Nombre del tecnico");
        assert_eq!(section.fields[0].placeholder.as_deref(), Some("Ingrese Nombre del tecnico"));
        assert_eq!(section.fields[1].binding, FieldBinding::MonitoringType);
        assert_eq!(section.fields[2].kind, FieldKind::Select(DAY_CONDITION_CHOICES));
        assert!(section.fields.iter().all(|f| f.validation.required));
    }

    #[test]
    fn test_census_layout() {
        let (session, _) = session("poblacion");
        let t = template();
        let layout = render(Some(&t), &session);

        assert!(layout.field(LOT_FIELD_KEY).is_some());
        let units: Vec<_> = layout
            .sections
            .iter()
            .filter(|s| s.id.starts_with("censo_planta_"))
            .collect();
        assert_eq!(units.len(), SAMPLE_SIZE);
        assert_eq!(units[0].fields.len(), 3);
        assert!(units[0].title.starts_with("Planta 1: Surco "));
        assert!(layout.field("censo_planta_5_diametro").is_some());
    }

    #[test]
    fn test_no_unit_sections_before_lot() {
        let mut sampler = Sampler::new(StdRng::seed_from_u64(5), PhasePolicy::UserAssigned);
        let mut s = SurveySession::default();
        s.select_template(&template());
        s.set_characterization(MONITORING_FIELD, "poblacion", &mut sampler);
        let t = template();
        let layout = render(Some(&t), &s);
        assert_eq!(layout.sections.len(), 2);
    }

    #[test]
    fn test_phenology_fields_follow_phase() {
        let (mut session, _) = session("fenologico");
        let t = template();
        let unset = render(Some(&t), &session);
        assert_eq!(unset.section("fenologico_planta_1").unwrap().fields.len(), 1);

        session.set_phase(1, Phase::Fructificacion);
        let layout = render(Some(&t), &session);
        let fields = &layout.section("fenologico_planta_1").unwrap().fields;
        assert_eq!(fields.len(), 7);
        assert_eq!(fields[0].binding, FieldBinding::Phase { unit: 1 });
        assert!(layout.field("fenologico_planta_1_frutos_cuarto").is_some());
        assert!(layout.field("fenologico_planta_2_total_hojas").is_none());
    }

    #[test]
    fn test_section_identity_follows_sampled_plant() {
        let (mut session, _) = session("poblacion");
        let t = template();
        let before = render(Some(&t), &session);

        let replacement = Planta::new(99, 99);
        session.units[0] = replacement.clone();
        session.phenology_units[0] = PlantaFenologica::unassigned(replacement);
        let after = render(Some(&t), &session);

        let a = before.section("censo_planta_1").unwrap();
        let b = after.section("censo_planta_1").unwrap();
        assert_eq!(a.fields, b.fields);
        assert!(b.title.contains("Surco 99, Planta 99"));
        assert_ne!(a.identity(), b.identity());
        assert_eq!(
            before.section("censo_planta_2").unwrap().identity(),
            after.section("censo_planta_2").unwrap().identity()
        );
    }

    #[test]
    fn test_layout_ignores_leaf_values() {
        let (mut session, _) = session("poblacion");
        let t = template();
        let before = render(Some(&t), &session);
        session.set_answer("censo_planta_1_altura", "1.5");
        session.set_answer("Nombre_del_tecnico", "Ana");
        assert_eq!(render(Some(&t), &session), before);
    }

    #[test]
    fn test_arthropod_branches() {
        let (mut session, _) = session("artropodos");
        let t = template();

        let layout = render(Some(&t), &session);
        assert!(layout.section("artropodo_otro").is_some());
        assert!(layout.section("artropodo_planta_2_insecto").is_none());

        session.toggle_class(2, ArthropodClass::Insecto, true);
        session.select_insect(2, Some(InsectSpecies::Compsus));
        session.toggle_class(2, ArthropodClass::Aracnido, true);
        session.select_mite(2, Some(MiteSpecies::Otro));
        let layout = render(Some(&t), &session);

        let insect = layout.section("artropodo_planta_2_insecto").unwrap();
        assert!(insect.hint.is_some());
        assert!(layout.field("artropodo_planta_2_insecto_compsus_adultos").is_some());
        assert!(layout.field("artropodo_planta_2_insecto_compsus_fotos").is_some());
        assert!(layout.field("artropodo_planta_2_acaro_otro_nombre").is_some());
        assert!(layout.section("artropodo_planta_1_insecto").is_none());
    }

    #[test]
    fn test_transitions_keep_answers_reachable() {
        let (mut session, mut sampler) = session("artropodos");
        session.toggle_class(1, ArthropodClass::Insecto, true);
        session.select_insect(1, Some(InsectSpecies::Toxoptera));
        session.set_answer("artropodo_planta_1_insecto_toxoptera_brotes", "3");
        assert_reachable(&session);

        session.select_insect(1, Some(InsectSpecies::Diaphorina));
        assert_reachable(&session);

        session.toggle_class(1, ArthropodClass::Insecto, false);
        assert_reachable(&session);

        session.set_characterization(MONITORING_FIELD, "fenologico", &mut sampler);
        session.set_phase(3, Phase::Vegetativa);
        session.set_answer("fenologico_planta_3_total_hojas", "45");
        assert_reachable(&session);

        session.set_phase(3, Phase::Floracion);
        assert_reachable(&session);
    }
}
