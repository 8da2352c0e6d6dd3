use std::time::Duration;

use dioxus::prelude::*;

use services::{Notification, NotificationLevel};

use crate::context::UiState;

const TOAST_DURATION: Duration = Duration::from_secs(4);

/// Shows the current notification and clears it after a few seconds.
#[component]
pub fn Toast() -> Element {
    let ui = use_context::<UiState>();
    let toast = ui.toast;

    use_effect(move || {
        let Some(shown) = toast.read().clone() else {
            return;
        };
        let mut toast = toast;
        spawn(async move {
            tokio::time::sleep(TOAST_DURATION).await;
            if toast.peek().as_ref() == Some(&shown) {
                toast.set(None);
            }
        });
    });

    let current = toast.read().clone();
    rsx! {
        if let Some(notification) = current {
            ToastMessage {
                notification,
                on_dismiss: move |()| {
                    let mut toast = toast;
                    toast.set(None);
                },
            }
        }
    }
}

#[component]
pub fn ToastMessage(notification: Notification, on_dismiss: EventHandler<()>) -> Element {
    let class = match notification.level() {
        NotificationLevel::Success => "toast toast-success",
        NotificationLevel::Error => "toast toast-error",
    };
    rsx! {
        div { class: "{class}", role: "status",
            span { "{notification.message()}" }
            button {
                class: "toast-close",
                r#type: "button",
                aria_label: "Dismiss",
                onclick: move |_| on_dismiss.call(()),
                "×"
            }
        }
    }
}
