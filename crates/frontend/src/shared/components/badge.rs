use contracts::domain::a003_batch::aggregate::ExpiryStatus;
use leptos::prelude::*;

/// Badge component with different variants
#[component]
pub fn Badge(
    /// Badge variant: "success", "warning", "error", "neutral" (default)
    #[prop(optional, into)]
    variant: MaybeProp<String>,
    /// Badge content
    children: Children,
) -> impl IntoView {
    let variant_class = move || match variant.get().as_deref().unwrap_or("neutral") {
        "success" => "badge--success",
        "warning" => "badge--warning",
        "error" => "badge--error",
        _ => "badge--neutral",
    };

    view! {
        <span class=move || format!("badge {}", variant_class())>
            {children()}
        </span>
    }
}

pub fn expiry_variant(status: ExpiryStatus) -> &'static str {
    match status {
        ExpiryStatus::Expired => "error",
        ExpiryStatus::ExpiringSoon(_) => "warning",
        ExpiryStatus::Valid => "success",
    }
}

/// Expiry badge of a batch
#[component]
pub fn ExpiryBadge(status: ExpiryStatus) -> impl IntoView {
    view! {
        <Badge variant=expiry_variant(status).to_string()>
            {status.label()}
        </Badge>
    }
}

/// Yes/no badge for boolean columns
#[component]
pub fn FlagBadge(
    value: bool,
    yes: &'static str,
    no: &'static str,
    /// Render a true value as an error
    #[prop(optional)]
    danger_when_true: bool,
) -> impl IntoView {
    let variant = match (value, danger_when_true) {
        (true, true) => "error",
        (true, false) => "success",
        (false, _) => "neutral",
    };
    view! {
        <Badge variant=variant.to_string()>
            {if value { yes } else { no }}
        </Badge>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry_variants() {
        assert_eq!(expiry_variant(ExpiryStatus::Expired), "error");
        assert_eq!(expiry_variant(ExpiryStatus::ExpiringSoon(3)), "warning");
        assert_eq!(expiry_variant(ExpiryStatus::Valid), "success");
    }
}
