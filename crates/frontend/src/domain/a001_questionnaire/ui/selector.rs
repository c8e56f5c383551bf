use contracts::domain::a001_questionnaire::FormTemplate;
use leptos::prelude::*;
use thaw::*;

/// One button per questionnaire, labelled with its participant type
#[component]
pub fn TemplateSelector(
    #[prop(into)] templates: Signal<Vec<FormTemplate>>,
    #[prop(into)] selected: Signal<Option<String>>,
    on_select: Callback<String>,
) -> impl IntoView {
    view! {
        <div class="selector">
            <h2 class="selector__title">"Selecciona un tipo de cuestionario"</h2>
            <Flex justify=FlexJustify::Center gap=FlexGap::Medium>
                <For
                    each=move || templates.get()
                    key=|t| t.id.clone()
                    children=move |template| {
                        let id = template.id.clone();
                        let probe = id.clone();
                        let appearance = Signal::derive(move || {
                            if selected.get().as_deref() == Some(probe.as_str()) {
                                ButtonAppearance::Primary
                            } else {
                                ButtonAppearance::Secondary
                            }
                        });
                        view! {
                            <Button
                                appearance=appearance
                                on_click=move |_| on_select.run(id.clone())
                            >
                                {template.participant_type().to_string()}
                            </Button>
                        }
                    }
                />
            </Flex>
        </div>
    }
}
