//! Plain-text rendering of the active screen.

use crate::admin::{self, Occupancy, HEATMAP_SLOTS, HEATMAP_TURFS};
use crate::app::{AdminView, AppState, Confirmation, HomeView, PaymentDraft, Screen, SlotSelection};
use crate::cities;
use crate::login::{LoginForm, LoginStep};
use crate::payment::Bank;
use crate::schedule::{Availability, Slot};
use crate::ticket::Ticket;
use chrono::NaiveDate;

const RULE: &str = "----------------------------------------";

/// Render the whole screen
///
/// `window` is the list of selectable dates, numbered for `date <n>`.
#[must_use]
pub fn render(state: &AppState, window: &[NaiveDate]) -> String {
    let mut lines = Vec::new();

    if let Some(session) = &state.session {
        lines.push(format!("{} ({})", session.user.name, session.role));
    }
    if let Some(notice) = &state.notice {
        lines.push(format!("! {notice}"));
    }

    match &state.screen {
        Screen::Login(form) => login(form, &mut lines),
        Screen::Home(view) => home(state, view, &mut lines),
        Screen::Slots(selection) => slots(selection, window, &mut lines),
        Screen::Payment(draft) => payment(draft, &mut lines),
        Screen::Success(confirmation) => success(confirmation, &mut lines),
        Screen::Admin(view) => dashboard(view, &mut lines),
    }

    lines.push(RULE.to_string());
    lines.join("\n")
}

fn login(form: &LoginForm, lines: &mut Vec<String>) {
    lines.push("== Login ==".to_string());
    if let Some(notice) = &form.notice {
        lines.push(format!("! {notice}"));
    }
    match form.step {
        LoginStep::Details => {
            lines.push("Enter your details:".to_string());
            lines.push("  login <user|admin> <name> | <email> | <mobile>".to_string());
        },
        LoginStep::OtpSent => {
            lines.push(format!("Code sent to {} as {}.", form.mobile, form.role));
            lines.push("  verify <otp>   (or 'edit' to change details)".to_string());
        },
    }
}

fn home(state: &AppState, view: &HomeView, lines: &mut Vec<String>) {
    lines.push(format!("== Turfs in {} ==", state.city));

    if let Some(query) = &view.picker {
        let matches = cities::search(query);
        lines.push(format!("Choose a city ({} found):", matches.len()));
        lines.extend(matches.iter().map(|city| format!("  {city}")));
        lines.push("  pick <city>, city <query>, close".to_string());
        return;
    }

    if state.venues_loading {
        lines.push("Loading venues...".to_string());
    } else if state.venues.is_empty() {
        lines.push(format!("No venues found in {}.", state.city));
    } else {
        for (n, venue) in state.venues.iter().enumerate() {
            lines.push(format!(
                "{:>2}. {}  {}, {}  {}/hr  ★ {:.1}",
                n + 1,
                venue.name,
                venue.location,
                venue.city,
                venue.price_per_hour,
                venue.rating
            ));
        }
        lines.push("  book <n>".to_string());
    }
    lines.push("  city to change location".to_string());
}

fn slots(selection: &SlotSelection, window: &[NaiveDate], lines: &mut Vec<String>) {
    let venue = &selection.venue;
    lines.push(format!("== {} ==", venue.name));
    lines.push(format!("{}, {}  {}/hr", venue.location, venue.city, venue.price_per_hour));

    lines.push("Dates:".to_string());
    for (n, date) in window.iter().enumerate() {
        let marker = if selection.date == Some(*date) { '*' } else { ' ' };
        lines.push(format!("{marker}{:>2}. {}", n + 1, date.format("%a %d %b")));
    }

    let Some(date) = selection.date else {
        lines.push("Pick a date to see slots:  date <n>".to_string());
        return;
    };

    lines.push(format!("Slots for {}:", date.format("%a %d %b")));
    for slot in Slot::all() {
        let state = match slot.availability() {
            _ if selection.hold.contains(slot) => "selected",
            Availability::Available => "",
            Availability::Busy => "booked",
            Availability::Disabled => "closed",
        };
        lines.push(format!("{:>3}. {}  {state}", slot.index() + 1, slot.label()));
    }

    if selection.hold.is_empty() {
        lines.push("  slot <n> to select".to_string());
    } else {
        let quote = selection.quote();
        lines.push(format!(
            "{} slot(s) held for {}  total {}",
            quote.slot_count,
            selection.hold.countdown(),
            quote.total
        ));
        lines.push("  continue, or slot <n> to change".to_string());
    }
    lines.push("  back".to_string());
}

fn payment(draft: &PaymentDraft, lines: &mut Vec<String>) {
    let quote = &draft.quote;
    lines.push("== Payment ==".to_string());
    lines.push(format!("{}, {}", draft.venue.name, draft.date.format("%a %d %b %Y")));
    lines.push(format!("Slots: {}", crate::schedule::join_labels(&draft.slots)));
    lines.push(format!(
        "{} × {} = {}   ({} per slot)",
        quote.price_per_hour,
        quote.slot_count,
        quote.base,
        quote.per_slot()
    ));
    lines.push(format!("Discount: {}", quote.discount));
    lines.push(format!("Platform fee: {}", quote.platform_fee));
    lines.push(format!("Total: {}", quote.total));

    if let Some(error) = &draft.error {
        lines.push(format!("! {error}"));
    }
    if draft.submitting {
        lines.push("Processing payment...".to_string());
        return;
    }

    let banks: Vec<&str> = Bank::ALL.iter().map(|bank| bank.name()).collect();
    lines.push("  pay upi <id>".to_string());
    lines.push("  pay card".to_string());
    lines.push(format!("  pay netbanking <{}>", banks.join(" | ")));
    lines.push("  back".to_string());
}

fn success(confirmation: &Confirmation, lines: &mut Vec<String>) {
    let ticket = Ticket::for_booking(&confirmation.booking);
    lines.push("== Booking confirmed ==".to_string());
    lines.push(format!("Ref {}", ticket.reference));
    lines.push(confirmation.venue.name.clone());
    lines.push(ticket.date);
    lines.push(ticket.slots);
    lines.push(format!("{}  {}", ticket.amount, ticket.paid_via));
    lines.push(String::new());
    lines.extend(ticket.pattern.iter().map(|row| {
        row.iter()
            .map(|dark| if *dark { "██" } else { "  " })
            .collect::<String>()
    }));
    lines.push(String::new());
    lines.push("  home".to_string());
}

fn dashboard(view: &AdminView, lines: &mut Vec<String>) {
    lines.push("== Admin dashboard ==".to_string());
    lines.push(
        admin::stats()
            .iter()
            .map(|card| format!("{}: {}", card.title, card.value))
            .collect::<Vec<_>>()
            .join("  |  "),
    );

    lines.push(String::new());
    if view.search.is_empty() {
        lines.push("Today's bookings:".to_string());
    } else {
        lines.push(format!("Today's bookings matching '{}':", view.search));
    }
    let rows = view.visible_rows();
    if rows.is_empty() {
        lines.push("  (none)".to_string());
    }
    for row in rows {
        lines.push(format!(
            "  {}  {:<16} {:<14} {:<8} {:>6}  {}",
            row.date, row.turf, row.slot, row.user, row.amount.to_string(), row.status
        ));
    }

    lines.push(String::new());
    lines.push("Turf performance:".to_string());
    for turf in admin::performance() {
        lines.push(format!("  {:<16} {:>2} slots  {}", turf.turf, turf.slots, turf.revenue));
    }

    lines.push(String::new());
    lines.push(format!("Availability     {}", HEATMAP_SLOTS.join("   ")));
    for turf in HEATMAP_TURFS {
        let cells: Vec<&str> = (0..HEATMAP_SLOTS.len())
            .map(|column| match Occupancy::for_column(column) {
                Occupancy::Free => "free",
                Occupancy::Filling => "fill",
                Occupancy::Full => "full",
            })
            .collect();
        lines.push(format!("  {turf:<14} {}", cells.join("  ")));
    }
    lines.push("  search [query], export <path>".to_string());
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::gateway::memory::sample_venues;
    use crate::types::{BookingId, BookingStatus, Money, NewBooking, Role};

    fn window() -> Vec<NaiveDate> {
        crate::schedule::booking_window(NaiveDate::from_ymd_opt(2025, 1, 25).unwrap(), 7)
    }

    #[test]
    fn empty_city_says_no_venues() {
        let mut state = AppState::signed_out("Theni");
        state.screen = Screen::landing(Role::User);

        assert!(render(&state, &window()).contains("No venues found in Theni."));
    }

    #[test]
    fn slots_hidden_until_date_chosen() {
        let mut state = AppState::signed_out("Bengaluru");
        let mut selection = SlotSelection::new(sample_venues()[0].clone(), 300);
        state.screen = Screen::Slots(selection.clone());
        assert!(!render(&state, &window()).contains("06:00 AM - 07:00 AM"));

        selection.date = Some(window()[0]);
        selection.hold.toggle(Slot::from_index(1).unwrap());
        state.screen = Screen::Slots(selection);
        let screen = render(&state, &window());

        assert!(screen.contains("06:00 AM - 07:00 AM  closed"));
        assert!(screen.contains("07:00 AM - 08:00 AM  selected"));
        assert!(screen.contains("held for 05:00  total ₹800"));
    }

    #[test]
    fn success_shows_ticket() {
        let booking = NewBooking {
            turf_id: sample_venues()[0].id.clone(),
            booking_date: window()[0],
            time_slot: "07:00 AM - 08:00 AM".to_string(),
            user_name: "Askar".to_string(),
            user_email: "askar@example.com".to_string(),
            payment_method: "CARD".to_string(),
            total_amount: Money::rupees(800),
            status: BookingStatus::Confirmed,
        }
        .with_id(BookingId::new("3f2a9c1e-77aa-4b3c-9d10-5e6f7a8b9c0d"));

        let mut state = AppState::signed_out("Bengaluru");
        state.screen = Screen::Success(Confirmation {
            venue: sample_venues()[0].clone(),
            booking,
        });
        let screen = render(&state, &window());

        assert!(screen.contains("Ref 3F2A9C1E"));
        assert!(screen.contains("Saturday, January 25, 2025"));
        assert!(screen.contains("₹800  Paid via CARD"));
    }

    #[test]
    fn dashboard_lists_filtered_rows() {
        let mut state = AppState::signed_out("Bengaluru");
        state.screen = Screen::Admin(AdminView {
            search: "nobody".to_string(),
        });

        let screen = render(&state, &window());
        assert!(screen.contains("Total Turfs: 8"));
        assert!(screen.contains("(none)"));
    }
}
