use chrono::{NaiveDate, NaiveDateTime};
use shared::calendar_grid::{
    banner_events_on, events_in_slot, events_on, slot_start, HOURS_PER_DAY, WEEKDAY_LABELS,
};
use shared::{CalendarEvent, CalendarView, DateRange, DateSelection, MonthView, WeekView};
use yew::prelude::*;

use crate::services::date_utils::today;

#[derive(Properties, PartialEq)]
pub struct ScheduleCalendarProps {
    pub events: Vec<CalendarEvent>,
    /// Fired on mount and after every page or view change with the visible
    /// range: 42 days for the month grid, 7 for the week grid
    pub on_dates_set: Callback<DateRange>,
    pub on_event_click: Callback<String>,
    /// Drag selection is only enabled when this is set
    #[prop_or_default]
    pub on_date_select: Option<Callback<DateSelection>>,
    #[prop_or_default]
    pub loading: bool,
}

/// Cells between the drag anchor and the cell under the pointer
#[derive(Clone, Copy, PartialEq)]
struct Drag<T> {
    anchor: T,
    focus: T,
}

impl<T: Copy + Ord> Drag<T> {
    fn at(cell: T) -> Self {
        Self { anchor: cell, focus: cell }
    }

    fn covers(&self, cell: T) -> bool {
        let (first, last) = if self.anchor <= self.focus {
            (self.anchor, self.focus)
        } else {
            (self.focus, self.anchor)
        };
        first <= cell && cell <= last
    }
}

#[function_component(ScheduleCalendar)]
pub fn schedule_calendar(props: &ScheduleCalendarProps) -> Html {
    let anchor = use_state(today);
    let view = use_state(CalendarView::default);
    let range = view.visible_range(*anchor);

    // Report the visible range whenever it changes
    {
        let on_dates_set = props.on_dates_set.clone();
        use_effect_with(range, move |range| {
            on_dates_set.emit(*range);
            || ()
        });
    }

    let on_prev = {
        let anchor = anchor.clone();
        let view = *view;
        Callback::from(move |_: MouseEvent| anchor.set(view.step(*anchor, false)))
    };
    let on_next = {
        let anchor = anchor.clone();
        let view = *view;
        Callback::from(move |_: MouseEvent| anchor.set(view.step(*anchor, true)))
    };
    let on_today = {
        let anchor = anchor.clone();
        Callback::from(move |_: MouseEvent| anchor.set(today()))
    };
    let switch_to = |target: CalendarView| {
        let view = view.clone();
        Callback::from(move |_: MouseEvent| {
            if *view != target {
                view.set(target);
            }
        })
    };
    let view_button = |target: CalendarView, label: &'static str| {
        let class = classes!("btn", if *view == target { "btn-primary" } else { "btn-secondary" });
        html! { <button class={class} onclick={switch_to(target)}>{label}</button> }
    };

    html! {
        <div class="schedule-calendar">
            <div class="calendar-toolbar">
                <div class="calendar-nav">
                    <button class="btn btn-secondary" onclick={on_prev}>{"‹"}</button>
                    <button class="btn btn-secondary" onclick={on_today}>{"오늘"}</button>
                    <button class="btn btn-secondary" onclick={on_next}>{"›"}</button>
                </div>
                <h2 class="calendar-title">{view.title(*anchor)}</h2>
                if props.loading {
                    <span class="calendar-loading">{"불러오는 중..."}</span>
                }
                <div class="calendar-views">
                    { view_button(CalendarView::Month, "월") }
                    { view_button(CalendarView::Week, "주") }
                </div>
            </div>

            {
                match *view {
                    CalendarView::Month => html! {
                        <MonthGrid month={MonthView::containing(*anchor)}
                                   events={props.events.clone()}
                                   on_event_click={props.on_event_click.clone()}
                                   on_date_select={props.on_date_select.clone()} />
                    },
                    CalendarView::Week => html! {
                        <WeekGrid week={WeekView::containing(*anchor)}
                                  events={props.events.clone()}
                                  on_event_click={props.on_event_click.clone()}
                                  on_date_select={props.on_date_select.clone()} />
                    },
                }
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct MonthGridProps {
    month: MonthView,
    events: Vec<CalendarEvent>,
    on_event_click: Callback<String>,
    on_date_select: Option<Callback<DateSelection>>,
}

#[function_component(MonthGrid)]
fn month_grid(props: &MonthGridProps) -> Html {
    let drag = use_state(|| None::<Drag<NaiveDate>>);
    let selectable = props.on_date_select.is_some();
    let month = props.month;

    let on_grid_leave = {
        let drag = drag.clone();
        Callback::from(move |_: MouseEvent| drag.set(None))
    };

    let current_day = today();
    let weeks = month.weeks().into_iter().map(|week| {
        let days = week.into_iter().map(|day| {
            let mut class = classes!("calendar-day");
            if !month.is_in_month(day) {
                class.push("other-month");
            }
            if day == current_day {
                class.push("today");
            }
            if (*drag).map(|d| d.covers(day)).unwrap_or(false) {
                class.push("selecting");
            }

            let on_mouse_down = {
                let drag = drag.clone();
                Callback::from(move |e: MouseEvent| {
                    if selectable {
                        e.prevent_default();
                        drag.set(Some(Drag::at(day)));
                    }
                })
            };
            let on_mouse_enter = {
                let drag = drag.clone();
                Callback::from(move |_: MouseEvent| {
                    if let Some(current) = *drag {
                        if current.focus != day {
                            drag.set(Some(Drag { focus: day, ..current }));
                        }
                    }
                })
            };
            let on_mouse_up = {
                let drag = drag.clone();
                let on_date_select = props.on_date_select.clone();
                Callback::from(move |_: MouseEvent| {
                    let Some(current) = *drag else {
                        return;
                    };
                    drag.set(None);
                    if let Some(on_date_select) = &on_date_select {
                        on_date_select.emit(DateSelection::between(current.anchor, day));
                    }
                })
            };

            html! {
                <div class={class}
                     onmousedown={on_mouse_down}
                     onmouseenter={on_mouse_enter}
                     onmouseup={on_mouse_up}>
                    <div class="day-number">{day.format("%-d").to_string()}</div>
                    <div class="day-events">
                        { for events_on(&props.events, day).into_iter().map(|event| event_chip(event, &props.on_event_click)) }
                    </div>
                </div>
            }
        });

        html! { <div class="calendar-week">{ for days }</div> }
    });

    html! {
        <>
            <div class="calendar-weekdays">
                { for WEEKDAY_LABELS.iter().map(|label| html! { <div class="calendar-weekday">{*label}</div> }) }
            </div>

            <div class={classes!("calendar-grid", selectable.then_some("selectable"))} onmouseleave={on_grid_leave}>
                { for weeks }
            </div>
        </>
    }
}

#[derive(Properties, PartialEq)]
struct WeekGridProps {
    week: WeekView,
    events: Vec<CalendarEvent>,
    on_event_click: Callback<String>,
    on_date_select: Option<Callback<DateSelection>>,
}

/// Seven day columns of hour slots with an all-day row on top
#[function_component(WeekGrid)]
fn week_grid(props: &WeekGridProps) -> Html {
    let drag = use_state(|| None::<Drag<NaiveDateTime>>);
    let selectable = props.on_date_select.is_some();
    let days = props.week.days();
    let current_day = today();

    let on_grid_leave = {
        let drag = drag.clone();
        Callback::from(move |_: MouseEvent| drag.set(None))
    };

    let header = days.iter().zip(WEEKDAY_LABELS).map(|(day, label)| {
        let class = classes!("week-day-header", (*day == current_day).then_some("today"));
        html! { <div class={class}>{format!("{} {}", label, day.format("%-m/%-d"))}</div> }
    });

    let banners = days.iter().map(|day| {
        html! {
            <div class="week-all-day-cell">
                { for banner_events_on(&props.events, *day).into_iter().map(|event| event_chip(event, &props.on_event_click)) }
            </div>
        }
    });

    let rows = (0..HOURS_PER_DAY).map(|hour| {
        let cells = days.iter().map(|day| {
            let slot = slot_start(*day, hour);
            let mut class = classes!("week-slot");
            if (*drag).map(|d| d.covers(slot)).unwrap_or(false) {
                class.push("selecting");
            }

            let on_mouse_down = {
                let drag = drag.clone();
                Callback::from(move |e: MouseEvent| {
                    if selectable {
                        e.prevent_default();
                        drag.set(Some(Drag::at(slot)));
                    }
                })
            };
            let on_mouse_enter = {
                let drag = drag.clone();
                Callback::from(move |_: MouseEvent| {
                    if let Some(current) = *drag {
                        if current.focus != slot {
                            drag.set(Some(Drag { focus: slot, ..current }));
                        }
                    }
                })
            };
            let on_mouse_up = {
                let drag = drag.clone();
                let on_date_select = props.on_date_select.clone();
                Callback::from(move |_: MouseEvent| {
                    let Some(current) = *drag else {
                        return;
                    };
                    drag.set(None);
                    if let Some(on_date_select) = &on_date_select {
                        on_date_select.emit(DateSelection::between_slots(current.anchor, slot));
                    }
                })
            };

            html! {
                <div class={class}
                     onmousedown={on_mouse_down}
                     onmouseenter={on_mouse_enter}
                     onmouseup={on_mouse_up}>
                    { for events_in_slot(&props.events, *day, hour).into_iter().map(|event| event_chip(event, &props.on_event_click)) }
                </div>
            }
        });

        html! {
            <div class="week-row">
                <div class="week-hour-label">{format!("{:02}:00", hour)}</div>
                { for cells }
            </div>
        }
    });

    html! {
        <div class={classes!("week-grid", selectable.then_some("selectable"))} onmouseleave={on_grid_leave}>
            <div class="week-row week-header">
                <div class="week-hour-label"></div>
                { for header }
            </div>
            <div class="week-row week-all-day">
                <div class="week-hour-label">{"종일"}</div>
                { for banners }
            </div>
            { for rows }
        </div>
    }
}

fn event_chip(event: &CalendarEvent, on_event_click: &Callback<String>) -> Html {
    let on_click = {
        let on_event_click = on_event_click.clone();
        let id = event.id.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            on_event_click.emit(id.clone());
        })
    };
    // Keep chip clicks from starting a drag selection
    let on_mouse_down = Callback::from(|e: MouseEvent| e.stop_propagation());

    let label = match event.time_text() {
        Some(time) => format!("{} {}", time, event.title),
        None => event.title.clone(),
    };

    html! {
        <div class="event-chip"
             style={format!("background-color: {};", event.color)}
             title={event.title.clone()}
             onmousedown={on_mouse_down}
             onclick={on_click}>
            {label}
        </div>
    }
}
