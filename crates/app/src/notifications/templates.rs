//! Confirmation e-mail rendering.

use std::fmt::Write as _;

use rusty_money::{Money, iso};

use crate::notifications::BookingConfirmation;

pub(crate) fn subject(confirmation: &BookingConfirmation) -> String {
    format!("Booking confirmed - {}", confirmation.booking.human_id)
}

pub(crate) fn confirmation_html(confirmation: &BookingConfirmation) -> String {
    let booking = &confirmation.booking;
    let payment = &confirmation.payment;

    let activities = if booking.activities.is_empty() {
        "<li>None</li>".to_string()
    } else {
        booking
            .activities
            .iter()
            .fold(String::new(), |mut items, activity| {
                let _infallible = write!(
                    items,
                    "<li>{} ({} per adult)</li>",
                    escape(&activity.name),
                    inr(activity.price)
                );

                items
            })
    };

    let special_requests = if booking.special_requests.trim().is_empty() {
        String::new()
    } else {
        format!(
            "<p><strong>Special requests:</strong> {}</p>",
            escape(&booking.special_requests)
        )
    };

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>Booking confirmed</title>
</head>
<body style="font-family: Arial, sans-serif; line-height: 1.6; color: #333;">
    <div style="max-width: 600px; margin: 0 auto; padding: 20px;">
        <h2 style="color: #15803d;">Your stay is confirmed</h2>
        <p>Dear {guest},</p>
        <p>Thank you for your payment. Your booking <strong>{booking_id}</strong> is confirmed.</p>
        <table style="border-collapse: collapse; width: 100%;">
            <tr><td>Package</td><td>{package}</td></tr>
            <tr><td>Check-in</td><td>{check_in}</td></tr>
            <tr><td>Check-out</td><td>{check_out}</td></tr>
            <tr><td>Guests</td><td>{adults} adult(s), {children} child(ren)</td></tr>
            <tr><td>Package amount</td><td>{package_amount}</td></tr>
            <tr><td>Activities amount</td><td>{activities_amount}</td></tr>
            <tr><td><strong>Total paid</strong></td><td><strong>{total}</strong></td></tr>
            <tr><td>Payment reference</td><td>{payment_id}</td></tr>
        </table>
        <h3>Activities</h3>
        <ul>{activities}</ul>
        {special_requests}
        <p style="color: #666; font-size: 14px;">We look forward to hosting you.</p>
    </div>
</body>
</html>
"#,
        guest = escape(&booking.guest.full_name),
        booking_id = escape(&booking.human_id),
        package = escape(&booking.package.name),
        check_in = booking.check_in,
        check_out = booking.check_out,
        adults = booking.adults,
        children = booking.children,
        package_amount = inr(booking.package_amount),
        activities_amount = inr(booking.activities_amount),
        total = inr(payment.amount),
        payment_id = escape(&payment.human_id),
    )
}

/// Format an amount in paise as rupees.
pub(crate) fn inr(paise: u64) -> String {
    match i64::try_from(paise) {
        Ok(minor) => Money::from_minor(minor, iso::INR).to_string(),
        Err(_) => format!("{paise} paise"),
    }
}

fn escape(value: &str) -> String {
    value
        .chars()
        .fold(String::with_capacity(value.len()), |mut escaped, c| {
            match c {
                '&' => escaped.push_str("&amp;"),
                '<' => escaped.push_str("&lt;"),
                '>' => escaped.push_str("&gt;"),
                '"' => escaped.push_str("&quot;"),
                '\'' => escaped.push_str("&#39;"),
                other => escaped.push(other),
            }

            escaped
        })
}
