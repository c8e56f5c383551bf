use leptos::prelude::*;

/// Text or number input with label and optional hint
#[component]
pub fn Input(
    /// Label text (optional)
    #[prop(optional, into)]
    label: MaybeProp<String>,
    /// Input value
    #[prop(into)]
    value: Signal<String>,
    /// Input event handler
    #[prop(optional)]
    on_input: Option<Callback<String>>,
    /// Placeholder text
    #[prop(optional, into)]
    placeholder: MaybeProp<String>,
    /// Help text rendered under the input
    #[prop(optional, into)]
    hint: MaybeProp<String>,
    /// Input type: "text" (default) or "number"
    #[prop(optional, into)]
    input_type: MaybeProp<String>,
    /// `min` attribute for number inputs
    #[prop(optional, into)]
    min: MaybeProp<String>,
    /// `step` attribute for number inputs
    #[prop(optional, into)]
    step: MaybeProp<String>,
    /// Required marker on the label
    #[prop(optional)]
    required: bool,
    /// ID for the input element
    #[prop(optional, into)]
    id: MaybeProp<String>,
) -> impl IntoView {
    let input_id = move || id.get().unwrap_or_default();
    let input_placeholder = move || placeholder.get().unwrap_or_default();
    let input_t = move || input_type.get().unwrap_or_else(|| "text".to_string());

    view! {
        <div class="form__group">
            {move || label.get().map(|l| view! {
                <label class="form__label" for=input_id>
                    {l}
                    {required.then(|| view! { <span class="form__required">" *"</span> })}
                </label>
            })}
            <input
                id=input_id
                class="form__input"
                type=input_t
                prop:value=move || value.get()
                placeholder=input_placeholder
                min=move || min.get()
                step=move || step.get()
                on:input=move |ev| {
                    if let Some(handler) = on_input {
                        handler.run(event_target_value(&ev));
                    }
                }
            />
            {move || hint.get().map(|h| view! { <small class="form__hint">{h}</small> })}
        </div>
    }
}
