//! Multi-select as a list of checkboxes.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct CheckboxListProps {
    pub id: String,
    pub label: String,
    pub options: Vec<String>,
    pub selected: Vec<String>,
    /// Receives the new selection, in the order options were ticked.
    pub on_change: EventHandler<Vec<String>>,
}

/// Toggle `option` in `selected`, keeping the order of selection.
pub(crate) fn toggle(selected: &[String], option: &str, checked: bool) -> Vec<String> {
    let mut next: Vec<String> = selected.iter().filter(|s| *s != option).cloned().collect();
    if checked {
        next.push(option.to_string());
    }
    next
}

#[component]
pub fn CheckboxList(props: CheckboxListProps) -> Element {
    let selected = props.selected.clone();
    rsx! {
        fieldset {
            id: "{props.id}",
            style: "margin: 8px 0; border: 1px solid #ddd; border-radius: 4px; max-height: 180px; overflow-y: auto;",
            legend {
                style: "font-weight: bold;",
                "{props.label}"
            }
            for option in props.options.iter().cloned() {
                label {
                    key: "{option}",
                    style: "display: block; font-size: 13px;",
                    input {
                        r#type: "checkbox",
                        checked: selected.contains(&option),
                        onchange: {
                            let selected = selected.clone();
                            let option = option.clone();
                            let on_change = props.on_change;
                            move |evt: Event<FormData>| {
                                on_change.call(toggle(&selected, &option, evt.checked()));
                            }
                        },
                    }
                    " {option}"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::toggle;

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn ticking_appends_in_selection_order() {
        let next = toggle(&names(&["Jeddah"]), "Abha", true);
        assert_eq!(next, names(&["Jeddah", "Abha"]));
    }

    #[test]
    fn unticking_removes_only_that_option() {
        let next = toggle(&names(&["Jeddah", "Abha", "Riyadh"]), "Abha", false);
        assert_eq!(next, names(&["Jeddah", "Riyadh"]));
    }

    #[test]
    fn ticking_twice_does_not_duplicate() {
        let next = toggle(&names(&["Abha"]), "Abha", true);
        assert_eq!(next, names(&["Abha"]));
    }
}
