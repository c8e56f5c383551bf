//! ViewModel of the survey page
//!
//! The whole form state is one `SurveySession` signal; the layout is a memo
//! over it, so typing into a leaf field never rebuilds the sections.

use contracts::domain::a001_questionnaire::FormTemplate;
use contracts::shared::config::SurveyConfig;
use contracts::shared::metadata::FieldBinding;
use contracts::usecases::u501_field_survey::{
    assemble, render, validate, FormLayout, InputEvent, Sampler, SubmissionMetadata,
    SurveySession,
};
use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::domain::a001_questionnaire::api::fetch_templates;
use crate::shared::fingerprint::device_fingerprint;
use crate::shared::notification::Notifications;
use crate::shared::storage::BrowserStorage;

#[derive(Clone, Copy)]
pub struct FieldSurveyVm {
    pub config: StoredValue<SurveyConfig>,

    // === Reference data ===
    pub templates: RwSignal<Vec<FormTemplate>>,

    // === Form state ===
    pub session: RwSignal<SurveySession>,
    pub layout: Memo<FormLayout>,

    // === UI State ===
    pub loading: RwSignal<bool>,
    pub load_error: RwSignal<Option<String>>,
    pub submitting: RwSignal<bool>,
    pub notifications: Notifications,

    sampler: StoredValue<Sampler<StdRng>>,
    save_timer: StoredValue<Option<Timeout>, LocalStorage>,
}

impl FieldSurveyVm {
    pub fn new(config: SurveyConfig) -> Self {
        let policy = config.sampling.phase_policy;
        let templates = RwSignal::new(Vec::<FormTemplate>::new());
        let mut sampler = Sampler::new(StdRng::from_entropy(), policy);
        let session = RwSignal::new(SurveySession::restore(&BrowserStorage, &mut sampler));

        let layout = Memo::new(move |_| {
            templates.with(|ts| session.with(|s| render(s.template(ts), s)))
        });

        Self {
            config: StoredValue::new(config),
            templates,
            session,
            layout,
            loading: RwSignal::new(false),
            load_error: RwSignal::new(None),
            submitting: RwSignal::new(false),
            notifications: Notifications::new(),
            sampler: StoredValue::new(sampler),
            save_timer: StoredValue::new_local(None),
        }
    }

    pub fn has_template(&self) -> Signal<bool> {
        let session = self.session;
        Signal::derive(move || session.with(|s| s.template_id.is_some()))
    }

    pub fn selected_template(&self) -> Signal<Option<String>> {
        let session = self.session;
        Signal::derive(move || session.with(|s| s.template_id.clone()))
    }

    // === Commands ===

    /// Fetch questionnaires; also used by the retry button
    pub fn load_templates(&self) {
        let this = *self;
        this.loading.set(true);
        this.load_error.set(None);

        leptos::task::spawn_local(async move {
            let config = this.config.get_value();
            match fetch_templates(&config).await {
                Ok(list) => {
                    let stale = this.session.with_untracked(|s| {
                        s.template_id.is_some() && s.template(&list).is_none()
                    });
                    this.templates.set(list);
                    if stale {
                        log::warn!("Stored questionnaire no longer offered, starting over");
                        this.session.update(|s| s.clear_template());
                        this.flush();
                    }
                }
                Err(e) => this.load_error.set(Some(e)),
            }
            this.loading.set(false);
        });
    }

    pub fn select_template(&self, id: String) {
        let template = self
            .templates
            .with_untracked(|ts| FormTemplate::find(ts, &id).cloned());
        match template {
            Some(template) => {
                self.session.update(|s| s.select_template(&template));
                self.schedule_save();
            }
            None => self.notifications.error("Formulario no encontrado"),
        }
    }

    /// Route one input change into the session
    pub fn apply(&self, key: String, binding: FieldBinding, event: InputEvent) {
        let sampler = self.sampler;
        self.session.update(|s| {
            sampler.update_value(|sampler| s.apply_input(&key, binding, event, sampler))
        });
        self.schedule_save();
    }

    pub fn reset(&self) {
        self.save_timer.set_value(None);
        self.session.update(|s| s.reset(&BrowserStorage));
    }

    pub fn submit(&self) {
        if self.submitting.get_untracked() {
            return;
        }

        let templates = self.templates.get_untracked();
        let session = self.session.get_untracked();
        if let Err(e) = validate(&session, &templates) {
            self.notifications.error(e.to_string());
            return;
        }
        let Some(template) = session.template(&templates).cloned() else {
            return;
        };

        let this = *self;
        this.submitting.set(true);

        leptos::task::spawn_local(async move {
            let metadata = SubmissionMetadata::now(device_fingerprint(&BrowserStorage));
            let payload = assemble(&template, &session, &metadata);
            let config = this.config.get_value();

            match super::api::submit_survey(&config, &payload).await {
                Ok(()) => {
                    log::info!("Survey submitted for questionnaire {}", payload.test_id);
                    this.reset();
                    this.notifications
                        .success("¡Respuestas enviadas correctamente!");
                }
                Err(e) => this.notifications.error(e),
            }
            this.submitting.set(false);
        });
    }

    // === Persistence ===

    /// Replacing the pending timeout cancels it
    fn schedule_save(&self) {
        let session = self.session;
        let delay = self.config.with_value(|c| c.persistence.debounce_ms);
        let timeout = Timeout::new(delay, move || {
            session.with_untracked(|s| s.save(&BrowserStorage));
        });
        self.save_timer.set_value(Some(timeout));
    }

    fn flush(&self) {
        self.save_timer.set_value(None);
        self.session.with_untracked(|s| s.save(&BrowserStorage));
    }
}
