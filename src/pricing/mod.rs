use crate::data::currency::{CurrencyValue, default_currency_value};
use crate::data::{
    Adjustment, ComputedLineItem, Customer, Document, DocumentType, LineItem, Payment,
};
use crate::messages::Messages;
use crate::util::validation::{Field, ValidationResult};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Largest measure, rate or amount a form field accepts.
const MAX_INPUT: u64 = 1_000_000_000;
const MAX_TAX_RATE: u64 = 100;

fn exceeds_limit(value: &Decimal) -> bool {
    *value > Decimal::from(MAX_INPUT)
}

/// Parses a decimal form field. Anything unparsable, empty or negative is 0.
pub(crate) fn lenient_decimal(input: &str) -> Decimal {
    match Decimal::from_str(input.trim()) {
        Ok(value) if value.is_sign_positive() => value,
        _ => default_currency_value(),
    }
}

/// Parses a piece count. Anything that isn't a non-negative integer is 0.
pub(crate) fn lenient_quantity(input: &str) -> u64 {
    input.trim().parse::<u64>().unwrap_or(0)
}

/// Raw line item as entered in the form.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub(crate) struct LineItemInput {
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) feet: String,
    pub(crate) quantity: String,
    pub(crate) rate: String,
    pub(crate) manual_total: String,
}

impl LineItemInput {
    pub(crate) fn normalize(&self) -> LineItem {
        LineItem {
            title: self.title.trim().to_owned(),
            description: self.description.trim_end().to_owned(),
            feet: lenient_decimal(&self.feet),
            quantity: lenient_quantity(&self.quantity),
            rate: lenient_decimal(&self.rate),
            manual_total: lenient_decimal(&self.manual_total),
        }
    }

    pub(crate) fn validate(&self) -> ValidationResult {
        self.normalize().validate()
    }
}

impl LineItem {
    pub(crate) fn validate(&self) -> ValidationResult {
        let mut validation_result = ValidationResult::new();
        if self.title.is_empty() {
            validation_result.add_error(
                Field::Title,
                format!("{} {}", Messages::Title, Messages::CanNotBeEmpty),
            );
        }
        if self.feet.is_zero() && self.quantity == 0 && self.manual_total.is_zero() {
            validation_result.add_error(Field::Measure, Messages::NeedsMeasure.msg().to_owned());
        }
        if [&self.feet, &self.rate, &self.manual_total]
            .into_iter()
            .any(exceeds_limit)
            || self.quantity > MAX_INPUT
        {
            validation_result.add_error(Field::Measure, Messages::NumberTooLarge.msg().to_owned());
        }
        validation_result
    }

    /// Feet win over pieces when both are given.
    pub(crate) fn measure(&self) -> Decimal {
        if self.feet > Decimal::ZERO {
            self.feet
        } else {
            Decimal::from(self.quantity)
        }
    }
}

pub(crate) fn compute_item(item: &LineItem) -> ComputedLineItem {
    let total = if item.rate > Decimal::ZERO {
        // saturates, the live preview computes items that weren't validated yet
        item.rate.saturating_mul(item.measure())
    } else {
        item.manual_total
    };
    ComputedLineItem {
        item: item.clone(),
        total: CurrencyValue::new_from_decimal(total),
    }
}

/// Computes items in entry order, returns them with their grand total.
pub(crate) fn compute_items(items: &[LineItem]) -> (Vec<ComputedLineItem>, CurrencyValue) {
    let mut grand_total = default_currency_value();
    let computed = items
        .iter()
        .map(|item| {
            let computed = compute_item(item);
            grand_total = grand_total.saturating_add(computed.total.value);
            computed
        })
        .collect();
    (computed, CurrencyValue::new_from_decimal(grand_total))
}

/// Amounts typed for the whole document, coerced like the item fields.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub(crate) struct DocumentAmounts {
    pub(crate) advance: Decimal,
    pub(crate) discount: Decimal,
    pub(crate) tax_rate: Decimal,
}

impl DocumentAmounts {
    pub(crate) fn parse(advance: &str, discount: &str, tax_rate: &str) -> Self {
        Self {
            advance: lenient_decimal(advance),
            discount: lenient_decimal(discount),
            tax_rate: lenient_decimal(tax_rate),
        }
    }

    fn validate(
        &self,
        document_type: DocumentType,
        grand_total: &CurrencyValue,
    ) -> ValidationResult {
        let mut validation_result = ValidationResult::new();
        if document_type.has_payment_boxes() && exceeds_limit(&self.advance) {
            validation_result.add_error(
                Field::Advance,
                format!("{}: {}", Messages::Advance, Messages::NumberTooLarge),
            );
        }
        if self.discount > grand_total.value {
            validation_result.add_error(Field::Discount, Messages::DiscountTooHigh.msg().to_owned());
        }
        if self.tax_rate > Decimal::from(MAX_TAX_RATE) {
            validation_result.add_error(Field::TaxRate, Messages::TaxRateTooHigh.msg().to_owned());
        }
        validation_result
    }
}

/// Totals below the item table.
#[derive(Debug, Clone, Eq, PartialEq)]
pub(crate) struct Totals {
    pub(crate) grand_total: CurrencyValue,
    pub(crate) adjustment: Option<Adjustment>,
    pub(crate) payment: Option<Payment>,
}

impl Totals {
    /// What the customer pays in the end.
    pub(crate) fn payable(&self) -> &CurrencyValue {
        self.adjustment
            .as_ref()
            .map(|a| &a.net_total)
            .unwrap_or(&self.grand_total)
    }
}

/// Tax is charged on the discounted sum.
pub(crate) fn compute_adjustment(
    grand_total: &CurrencyValue,
    discount: Decimal,
    tax_rate: Decimal,
) -> Option<Adjustment> {
    if discount.is_zero() && tax_rate.is_zero() {
        return None;
    }
    let taxable = grand_total.value.saturating_sub(discount);
    let tax = taxable.saturating_mul(tax_rate) / Decimal::ONE_HUNDRED;
    Some(Adjustment {
        discount: CurrencyValue::new_from_decimal(discount),
        tax_rate,
        tax: CurrencyValue::new_from_decimal(tax),
        net_total: CurrencyValue::new_from_decimal(taxable.saturating_add(tax)),
    })
}

pub(crate) fn compute_payment(payable: &CurrencyValue, advance: Decimal) -> Payment {
    // no floor, an overpaid invoice shows a negative due amount
    let due = payable.value.saturating_sub(advance);
    Payment {
        advance: CurrencyValue::new_from_decimal(advance),
        due: CurrencyValue::new_from_decimal(due),
    }
}

pub(crate) fn compute_totals(
    document_type: DocumentType,
    grand_total: CurrencyValue,
    amounts: &DocumentAmounts,
) -> Totals {
    let mut totals = Totals {
        adjustment: compute_adjustment(&grand_total, amounts.discount, amounts.tax_rate),
        grand_total,
        payment: None,
    };
    if document_type.has_payment_boxes() {
        totals.payment = Some(compute_payment(totals.payable(), amounts.advance));
    }
    totals
}

#[derive(Debug, Clone)]
pub(crate) struct DocumentInput<'a> {
    pub(crate) document_type: DocumentType,
    pub(crate) customer_name: &'a str,
    pub(crate) customer_mobile: &'a str,
    pub(crate) date: NaiveDate,
    pub(crate) advance: &'a str,
    pub(crate) discount: &'a str,
    pub(crate) tax_rate: &'a str,
    pub(crate) note: &'a str,
    pub(crate) items: &'a [LineItemInput],
}

/// Validates every item and computes the totals. No partial document is
/// produced if any item is invalid.
pub(crate) fn compute_document(input: &DocumentInput) -> Result<Document, ValidationResult> {
    let mut validation_result = ValidationResult::new();
    if input.items.is_empty() {
        validation_result.add_error(Field::Items, Messages::NoItems.msg().to_owned());
    }

    let items: Vec<LineItem> = input.items.iter().map(LineItemInput::normalize).collect();
    items.iter().enumerate().for_each(|(idx, item)| {
        let item_result = item.validate();
        if !item_result.is_ok() {
            validation_result.add_error(
                Field::Items,
                format!("{} {}: {}", Messages::Item, idx + 1, Messages::InvalidItem),
            );
        }
    });

    if !validation_result.is_ok() {
        return Err(validation_result);
    }

    let (computed, grand_total) = compute_items(&items);
    let amounts = DocumentAmounts::parse(input.advance, input.discount, input.tax_rate);
    validation_result.merge(amounts.validate(input.document_type, &grand_total));
    if !validation_result.is_ok() {
        return Err(validation_result);
    }
    let totals = compute_totals(input.document_type, grand_total, &amounts);

    Ok(Document {
        document_type: input.document_type,
        customer: Customer {
            name: input.customer_name.trim().to_owned(),
            mobile: input.customer_mobile.trim().to_owned(),
        },
        date: input.date,
        items: computed,
        note: input.note.trim().to_owned(),
        grand_total: totals.grand_total,
        adjustment: totals.adjustment,
        payment: totals.payment,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(title: &str, feet: &str, quantity: &str, rate: &str, manual: &str) -> LineItemInput {
        LineItemInput {
            title: title.to_owned(),
            description: String::default(),
            feet: feet.to_owned(),
            quantity: quantity.to_owned(),
            rate: rate.to_owned(),
            manual_total: manual.to_owned(),
        }
    }

    fn total_of(item: LineItemInput) -> Decimal {
        compute_item(&item.normalize()).total.value
    }

    fn document(document_type: DocumentType, items: &[LineItemInput], advance: &str) -> Document {
        compute_document(&DocumentInput {
            document_type,
            customer_name: " Rahim ",
            customer_mobile: "01700000000",
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            advance,
            discount: "",
            tax_rate: "",
            note: "",
            items,
        })
        .unwrap()
    }

    fn adjusted(
        document_type: DocumentType,
        discount: &str,
        tax_rate: &str,
    ) -> Result<Document, ValidationResult> {
        compute_document(&DocumentInput {
            document_type,
            customer_name: "Rahim",
            customer_mobile: "",
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            advance: "500",
            discount,
            tax_rate,
            note: "",
            items: &two_items(),
        })
    }

    fn two_items() -> Vec<LineItemInput> {
        vec![
            input("Window", "10", "", "50", "0"),
            input("Door", "0", "3", "500", ""),
        ]
    }

    #[test]
    fn lenient_decimal_coerces_to_zero() {
        assert_eq!(lenient_decimal("abc"), Decimal::ZERO);
        assert_eq!(lenient_decimal(""), Decimal::ZERO);
        assert_eq!(lenient_decimal("   "), Decimal::ZERO);
        assert_eq!(lenient_decimal("-5"), Decimal::ZERO);
        assert_eq!(lenient_decimal(" 12.5 "), Decimal::from_str("12.5").unwrap());
    }

    #[test]
    fn lenient_quantity_coerces_to_zero() {
        assert_eq!(lenient_quantity("abc"), 0);
        assert_eq!(lenient_quantity(""), 0);
        assert_eq!(lenient_quantity("-3"), 0);
        assert_eq!(lenient_quantity("2.5"), 0);
        assert_eq!(lenient_quantity(" 7 "), 7);
    }

    #[test]
    fn feet_wins_over_quantity() {
        assert_eq!(
            total_of(input("Window", "10", "4", "50", "")),
            Decimal::from(500)
        );
    }

    #[test]
    fn quantity_used_without_feet() {
        assert_eq!(total_of(input("Door", "0", "3", "200", "")), Decimal::from(600));
    }

    #[test]
    fn manual_total_used_without_rate() {
        assert_eq!(
            total_of(input("Custom Grill", "0", "0", "0", "1500")),
            Decimal::from(1500)
        );
        assert_eq!(total_of(input("Grill", "5", "2", "0", "0")), Decimal::ZERO);
        // manual total is ignored as soon as a rate is given
        assert_eq!(total_of(input("Grill", "5", "", "10", "999")), Decimal::from(50));
    }

    #[test]
    fn malformed_feet_falls_back_to_quantity() {
        assert_eq!(total_of(input("Frame", "abc", "5", "100", "")), Decimal::from(500));
    }

    #[test]
    fn malformed_numbers_never_fail() {
        let item = input("Frame", "x", "y", "z", "w").normalize();
        assert_eq!(compute_item(&item).total.value, Decimal::ZERO);
    }

    #[test]
    fn grand_total_is_sum_in_any_order() {
        let items = vec![
            input("A", "2.5", "", "40", "").normalize(),
            input("B", "", "3", "15", "").normalize(),
            input("C", "", "", "", "250").normalize(),
        ];
        let (computed, total) = compute_items(&items);
        assert_eq!(total.value, Decimal::from(395));
        let sum: Decimal = computed.iter().map(|c| c.total.value).sum();
        assert_eq!(sum, total.value);

        let mut reversed = items.clone();
        reversed.reverse();
        assert_eq!(compute_items(&reversed).1, total);
        assert_eq!(computed[0].item.title, "A");
        assert_eq!(computed[2].item.title, "C");
    }

    #[test]
    fn invoice_with_advance() {
        let doc = document(DocumentType::Invoice, &two_items(), "500");
        assert_eq!(doc.grand_total.value, Decimal::from(2000));
        let payment = doc.payment.unwrap();
        assert_eq!(payment.advance.value, Decimal::from(500));
        assert_eq!(payment.due.value, Decimal::from(1500));
        assert_eq!(doc.customer.name, "Rahim");
    }

    #[test]
    fn due_amount_is_not_clamped() {
        let doc = document(DocumentType::Invoice, &two_items(), "2500");
        assert_eq!(doc.payment.unwrap().due.value, Decimal::from(-500));
    }

    #[test]
    fn quotation_ignores_advance() {
        let doc = document(DocumentType::Quotation, &two_items(), "500");
        assert_eq!(doc.grand_total.value, Decimal::from(2000));
        assert!(doc.payment.is_none());
    }

    #[test]
    fn missing_title_is_rejected() {
        let result = input("  ", "10", "", "50", "").validate();
        assert!(result.has_errors());
        assert!(result.get_errors(&Field::Title).is_some());
    }

    #[test]
    fn item_without_measure_is_rejected() {
        let result = input("Window", "0", "abc", "50", "").validate();
        assert!(result.get_errors(&Field::Measure).is_some());
        assert!(input("Window", "", "1", "", "").validate().is_ok());
    }

    #[test]
    fn invalid_items_reject_the_document() {
        let items = vec![input("Window", "10", "", "50", ""), input("", "", "", "", "")];
        let result = compute_document(&DocumentInput {
            document_type: DocumentType::Invoice,
            customer_name: "",
            customer_mobile: "",
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            advance: "",
            discount: "",
            tax_rate: "",
            note: "",
            items: &items,
        });
        let errors = result.unwrap_err();
        assert_eq!(errors.get_errors(&Field::Items).map(|e| e.len()), Some(1));
    }

    #[test]
    fn empty_document_is_rejected() {
        let result = compute_document(&DocumentInput {
            document_type: DocumentType::Quotation,
            customer_name: "",
            customer_mobile: "",
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            advance: "",
            discount: "",
            tax_rate: "",
            note: "",
            items: &[],
        });
        assert!(result.is_err());
    }

    #[test]
    fn too_large_numbers_are_rejected() {
        let max = Decimal::MAX.to_string();
        let result = input("Frame", "1", "", &max, "").validate();
        assert!(result.get_errors(&Field::Measure).is_some());
        assert!(input("Frame", "", "1000000001", "1", "").validate().has_errors());
        assert!(input("Frame", "", "", "", "1000000001").validate().has_errors());
        assert!(input("Frame", "1000000000", "", "1000000000", "").validate().is_ok());

        let items = vec![
            input("Huge", "1", "", &max, ""),
            input("Small", "1", "", "1", ""),
        ];
        let result = compute_document(&DocumentInput {
            document_type: DocumentType::Invoice,
            customer_name: "",
            customer_mobile: "",
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            advance: "",
            discount: "",
            tax_rate: "",
            note: "",
            items: &items,
        });
        assert!(result.unwrap_err().get_errors(&Field::Items).is_some());
    }

    #[test]
    fn overflowing_totals_never_reset_to_zero() {
        let max = Decimal::MAX.to_string();
        assert_eq!(total_of(input("Huge", "2", "", &max, "")), Decimal::MAX);

        let items = vec![
            input("A", "1", "", &max, "").normalize(),
            input("B", "1", "", "1", "").normalize(),
            input("C", "1", "", "5", "").normalize(),
        ];
        let (computed, total) = compute_items(&items);
        assert_eq!(total.value, Decimal::MAX);
        assert!(computed.iter().all(|c| c.total.value <= total.value));
    }

    #[test]
    fn largest_valid_items_add_up_exactly() {
        let items: Vec<LineItem> = (0..1000)
            .map(|_| input("Wall", "1000000000", "", "1000000000", "").normalize())
            .collect();
        let (_, total) = compute_items(&items);
        assert_eq!(
            total.value,
            Decimal::from(1_000_000_000_000_000_000_u64) * Decimal::from(1000)
        );
    }

    #[test]
    fn discount_and_tax_adjust_the_payable_amount() {
        // 2000 - 200 = 1800, 5% tax = 90
        let doc = adjusted(DocumentType::Invoice, "200", "5").unwrap();
        assert_eq!(doc.grand_total.value, Decimal::from(2000));
        let adjustment = doc.adjustment.unwrap();
        assert_eq!(adjustment.discount.value, Decimal::from(200));
        assert_eq!(adjustment.tax.value, Decimal::from(90));
        assert_eq!(adjustment.net_total.value, Decimal::from(1890));
        assert_eq!(doc.payment.unwrap().due.value, Decimal::from(1390));
    }

    #[test]
    fn no_adjustment_without_discount_or_tax() {
        let doc = adjusted(DocumentType::Invoice, "", "abc").unwrap();
        assert!(doc.adjustment.is_none());
        assert_eq!(doc.payment.unwrap().due.value, Decimal::from(1500));
    }

    #[test]
    fn quotation_keeps_tax_but_not_payment() {
        let doc = adjusted(DocumentType::Quotation, "", "10").unwrap();
        assert_eq!(doc.adjustment.map(|a| a.net_total.value), Some(Decimal::from(2200)));
        assert!(doc.payment.is_none());
    }

    #[test]
    fn invalid_discount_and_tax_rate_are_rejected() {
        let errors = adjusted(DocumentType::Invoice, "2001", "101").unwrap_err();
        assert!(errors.get_errors(&Field::Discount).is_some());
        assert!(errors.get_errors(&Field::TaxRate).is_some());
        assert!(adjusted(DocumentType::Invoice, "2000", "100").is_ok());
    }

    #[test]
    fn too_large_advance_is_rejected_on_invoices_only() {
        let items = two_items();
        let with_advance = |document_type| {
            compute_document(&DocumentInput {
                document_type,
                customer_name: "",
                customer_mobile: "",
                date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
                advance: "99999999999",
                discount: "",
                tax_rate: "",
                note: "",
                items: &items,
            })
        };
        let errors = with_advance(DocumentType::Invoice).unwrap_err();
        assert!(errors.get_errors(&Field::Advance).is_some());
        assert!(with_advance(DocumentType::Quotation).is_ok());
    }
}
