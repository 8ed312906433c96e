use crate::api::MonthlyCutoff;
use leptos::*;

pub fn option_label(cutoff: &MonthlyCutoff) -> String {
    format!(
        "{} ({} to {})",
        cutoff.year_month, cutoff.start_date, cutoff.end_date
    )
}

#[component]
pub fn MonthSelect(
    #[prop(into)] cutoffs: Signal<Vec<MonthlyCutoff>>,
    #[prop(into)] selected: Signal<Option<String>>,
    on_select: Callback<String>,
) -> impl IntoView {
    view! {
        <div class="mb-6 flex items-center gap-4">
            <label class="flex flex-col text-sm min-w-[200px]">
                <span class="font-medium text-fg">"Select Month"</span>
                <select
                    id="month-select"
                    class="mt-1 rounded-md border border-border px-3 py-2"
                    prop:value=move || selected.get().unwrap_or_default()
                    on:change=move |ev| on_select.call(event_target_value(&ev))
                >
                    {move || {
                        let cutoffs = cutoffs.get();
                        if cutoffs.is_empty() {
                            view! { <option value="" disabled=true>"No months available"</option> }
                                .into_view()
                        } else {
                            let current = selected.get();
                            cutoffs
                                .into_iter()
                                .map(|cutoff| {
                                    let is_selected = current.as_deref() == Some(cutoff.year_month.as_str());
                                    view! {
                                        <option value=cutoff.year_month.clone() selected=is_selected>
                                            {option_label(&cutoff)}
                                        </option>
                                    }
                                })
                                .collect_view()
                        }
                    }}
                </select>
            </label>
            <p class="text-sm text-fg-muted">"Select a month to enable salary calculations."</p>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::option_label;
    use crate::test_support::helpers::cutoff;

    #[test]
    fn option_label_spans_the_period() {
        assert_eq!(option_label(&cutoff("2024-03")), "2024-03 (2024-03-01 to 2024-03-28)");
    }
}
