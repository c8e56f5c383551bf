use leptos::prelude::*;
use thaw::*;

#[component]
pub fn Loading(#[prop(optional, into)] message: MaybeProp<String>) -> impl IntoView {
    let text = move || {
        message
            .get()
            .unwrap_or_else(|| "Cargando cuestionarios...".to_string())
    };

    view! {
        <div class="loading">
            <Spinner />
            <p class="loading__text">{text}</p>
        </div>
    }
}

/// Blocking error screen; the retry button is shown when `on_retry` is set
#[component]
pub fn ErrorDisplay(
    #[prop(into)] error: Signal<String>,
    #[prop(optional)] on_retry: Option<Callback<()>>,
) -> impl IntoView {
    view! {
        <div class="error-display">
            <MessageBar intent=MessageBarIntent::Error>
                <div>
                    <h2 class="error-display__title">"Error"</h2>
                    <p>{move || error.get()}</p>
                </div>
            </MessageBar>
            {on_retry.map(|retry| view! {
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| retry.run(())
                >
                    "Intentar nuevamente"
                </Button>
            })}
        </div>
    }
}
