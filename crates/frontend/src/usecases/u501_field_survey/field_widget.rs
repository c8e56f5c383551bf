use contracts::shared::metadata::{Choice, FieldKind, FieldSpec};
use contracts::usecases::u501_field_survey::InputEvent;
use leptos::prelude::*;

use super::view_model::FieldSurveyVm;
use crate::shared::components::ui::{Checklist, Input, Select, Textarea};

fn options(choices: &[Choice]) -> Vec<(String, String)> {
    choices
        .iter()
        .map(|(value, label)| (value.to_string(), label.to_string()))
        .collect()
}

/// One input of the layout, bound to the session through its `FieldSpec`
#[component]
pub fn FieldWidget(field: FieldSpec, vm: FieldSurveyVm) -> impl IntoView {
    let binding = field.binding;
    let required = field.validation.required;
    let label = field.label.clone();
    let placeholder = field.placeholder.clone();
    let hint = field.hint.map(str::to_string);
    let id = field.key.clone();

    let value = {
        let field = field.clone();
        Signal::derive(move || vm.session.with(|s| s.binding_value(&field)))
    };
    let on_set = {
        let key = field.key.clone();
        Callback::new(move |v: String| vm.apply(key.clone(), binding, InputEvent::Set(v)))
    };

    match field.kind {
        FieldKind::Text | FieldKind::Photo => view! {
            <Input
                id=id
                label=label
                value=value
                placeholder=placeholder
                hint=hint
                required=required
                on_input=on_set
            />
        }
        .into_any(),
        FieldKind::TextArea => view! {
            <Textarea
                id=id
                label=label
                value=value
                placeholder=placeholder
                required=required
                on_input=on_set
            />
        }
        .into_any(),
        FieldKind::Number { min, step } => view! {
            <Input
                id=id
                label=label
                value=value
                input_type="number"
                min=min.to_string()
                step=step.to_string()
                placeholder=placeholder
                hint=hint
                required=required
                on_input=on_set
            />
        }
        .into_any(),
        FieldKind::Select(choices) => view! {
            <Select
                id=id
                label=label
                value=value
                options=options(choices)
                required=required
                on_change=on_set
            />
        }
        .into_any(),
        FieldKind::Checklist(choices) => {
            let key = field.key.clone();
            let on_toggle = Callback::new(move |(value, checked): (String, bool)| {
                vm.apply(key.clone(), binding, InputEvent::Toggle { value, checked })
            });
            view! {
                <Checklist
                    id=id
                    label=label
                    value=value
                    options=options(choices)
                    required=required
                    on_toggle=on_toggle
                />
            }
            .into_any()
        }
    }
}
