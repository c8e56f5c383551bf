use contracts::shared::config::SurveyConfig;
use contracts::usecases::common::UseCaseMetadata;
use contracts::usecases::u501_field_survey::{FieldSurvey, FormSection};
use leptos::prelude::*;
use thaw::*;

use super::field_widget::FieldWidget;
use super::view_model::FieldSurveyVm;
use crate::domain::a001_questionnaire::ui::TemplateSelector;
use crate::shared::components::{ErrorDisplay, Loading};
use crate::shared::notification::NotificationBar;

#[component]
fn Section(section: FormSection, vm: FieldSurveyVm) -> impl IntoView {
    view! {
        <section class="form-section" id=section.id.clone()>
            <h2 class="form-section__title">{section.title.clone()}</h2>
            {section.hint.clone().map(|h| view! { <p class="form-section__hint" style="white-space: pre-line">{h}</p> })}
            <div class="form-section__fields">
                {section
                    .fields
                    .into_iter()
                    .map(|field| view! { <FieldWidget field=field vm=vm /> })
                    .collect_view()}
            </div>
        </section>
    }
}

#[component]
fn SurveyForm(vm: FieldSurveyVm) -> impl IntoView {
    let submit_label = move || {
        if vm.submitting.get() {
            "Enviando respuestas..."
        } else {
            "Enviar Respuestas"
        }
    };

    view! {
        <div class="survey-form">
            <For
                each=move || vm.layout.get().sections
                key=FormSection::identity
                children=move |section| view! { <Section section=section vm=vm /> }
            />
            <Flex justify=FlexJustify::Center gap=FlexGap::Medium>
                <Button
                    appearance=ButtonAppearance::Secondary
                    disabled=Signal::derive(move || vm.submitting.get())
                    on_click=move |_| vm.reset()
                >
                    "Reiniciar"
                </Button>
                <Button
                    appearance=ButtonAppearance::Primary
                    disabled=Signal::derive(move || vm.submitting.get())
                    on_click=move |_| vm.submit()
                >
                    {submit_label}
                </Button>
            </Flex>
        </div>
    }
}

#[component]
pub fn FieldSurveyPage(config: SurveyConfig) -> impl IntoView {
    log::debug!("Mounting {}", FieldSurvey::full_name());
    let vm = FieldSurveyVm::new(config);
    vm.load_templates();

    let on_select = Callback::new(move |id: String| vm.select_template(id));
    let on_retry = Callback::new(move |_: ()| vm.load_templates());

    view! {
        <div id=format!("{}--usecase", FieldSurvey::full_name()) class="encuesta">
            <h1 class="encuesta__title">"Sistema de Encuestas"</h1>
            <NotificationBar notifications=vm.notifications />
            {move || {
                if vm.loading.get() {
                    view! { <Loading /> }.into_any()
                } else if let Some(error) = vm.load_error.get() {
                    view! { <ErrorDisplay error=error on_retry=on_retry /> }.into_any()
                } else {
                    view! {
                        <TemplateSelector
                            templates=vm.templates
                            selected=vm.selected_template()
                            on_select=on_select
                        />
                        <Show when=move || vm.has_template().get()>
                            <SurveyForm vm=vm />
                        </Show>
                    }
                    .into_any()
                }
            }}
        </div>
    }
}
