use leptos::prelude::*;

/// Checkbox component
#[component]
pub fn Checkbox(
    /// Label text
    #[prop(into)]
    label: Signal<String>,
    /// Checked state
    #[prop(into)]
    checked: Signal<bool>,
    /// Change event handler
    #[prop(optional)]
    on_change: Option<Callback<bool>>,
    /// ID for the checkbox element
    #[prop(optional, into)]
    id: MaybeProp<String>,
) -> impl IntoView {
    let checkbox_id = move || id.get().unwrap_or_default();

    view! {
        <div class="form__checkbox-wrapper">
            <input
                id=checkbox_id
                type="checkbox"
                class="form__checkbox"
                prop:checked=move || checked.get()
                on:change=move |ev| {
                    if let Some(handler) = on_change {
                        handler.run(event_target_checked(&ev));
                    }
                }
            />
            <label class="form__checkbox-label" for=checkbox_id>
                {label}
            </label>
        </div>
    }
}

/// Group of checkboxes over a comma-joined value list
#[component]
pub fn Checklist(
    #[prop(optional, into)]
    label: MaybeProp<String>,
    /// Comma-joined checked values
    #[prop(into)]
    value: Signal<String>,
    /// Options: Vec of (value, label) tuples
    options: Vec<(String, String)>,
    /// Called with (option value, checked)
    on_toggle: Callback<(String, bool)>,
    #[prop(optional)]
    required: bool,
    /// Prefix of the generated checkbox ids
    #[prop(into)]
    id: String,
) -> impl IntoView {
    view! {
        <div class="form__group">
            {move || label.get().map(|l| view! {
                <span class="form__label">
                    {l}
                    {required.then(|| view! { <span class="form__required">" *"</span> })}
                </span>
            })}
            {options
                .into_iter()
                .map(|(val, text)| {
                    let checkbox_id = format!("{}_{}", id, val);
                    let probe = val.clone();
                    let checked = Signal::derive(move || {
                        value.with(|v| v.split(',').any(|item| item.trim() == probe))
                    });
                    view! {
                        <Checkbox
                            id=checkbox_id
                            label=text
                            checked=checked
                            on_change=Callback::new(move |is_checked: bool| {
                                on_toggle.run((val.clone(), is_checked))
                            })
                        />
                    }
                })
                .collect_view()}
        </div>
    }
}
