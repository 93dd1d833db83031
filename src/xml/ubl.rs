use tracing::debug;

use super::xml_utils::{Attributes, XmlSink, ancestor, attr, first, walk, within};
use crate::core::*;

/// Parse a UBL 2.1 Invoice or CreditNote into the canonical model.
///
/// Missing elements never fail the parse: strings default to empty,
/// dates and amounts to `None`. Only XML-level errors are reported.
pub fn from_ubl_xml(xml: &str) -> Result<Invoice, RacunError> {
    let mut parsed = ParsedInvoice::default();
    walk(xml, &mut parsed)?;
    let invoice = parsed.into_invoice();
    debug!(
        id = %invoice.id,
        lines = invoice.lines.len(),
        "parsed UBL invoice"
    );
    Ok(invoice)
}

// ---------------------------------------------------------------------------
// Parsing helpers
// ---------------------------------------------------------------------------

#[derive(Default)]
struct ParsedInvoice {
    id: Option<String>,
    issue_date: Option<String>,
    due_date: Option<String>,
    payment_due_date: Option<String>,
    delivery_date: Option<String>,
    type_code: Option<String>,
    currency: Option<String>,
    notes: Vec<String>,
    payment_terms: Option<String>,

    supplier: ParsedParty,
    customer: ParsedParty,

    payment: Option<ParsedPayment>,
    in_first_payment: bool,

    tax_amount: Option<String>,
    seen_tax_total: bool,
    subtotals: Vec<ParsedSubtotal>,
    current_subtotal: Option<ParsedSubtotal>,

    line_extension: Option<String>,
    tax_exclusive: Option<String>,
    tax_inclusive: Option<String>,
    payable: Option<String>,
    charge_total: Option<String>,
    allowance_total: Option<String>,

    lines: Vec<ParsedLine>,
    current_line: Option<ParsedLine>,
}

#[derive(Default)]
struct ParsedParty {
    name: Option<String>,
    registration_name: Option<String>,
    street: Option<String>,
    city: Option<String>,
    postal_code: Option<String>,
    country: Option<String>,
    tax_scheme_id: Option<String>,
    legal_company_id: Option<String>,
    legal_form: Option<String>,
    email: Option<String>,
}

#[derive(Default)]
struct ParsedPayment {
    code: Option<String>,
    payment_id: Option<String>,
    iban: Option<String>,
    note: Option<String>,
}

#[derive(Default)]
struct ParsedSubtotal {
    category: Option<String>,
    percent: Option<String>,
    taxable_amount: Option<String>,
    tax_amount: Option<String>,
    exemption_reason: Option<String>,
}

#[derive(Default)]
struct ParsedLine {
    id: Option<String>,
    name: Option<String>,
    description: Option<String>,
    quantity: Option<String>,
    unit_code: Option<String>,
    unit_price: Option<String>,
    line_total: Option<String>,
    vat_percent: Option<String>,
    vat_category: Option<String>,
}

fn is_ubl_root(name: &str) -> bool {
    matches!(name, "Invoice" | "CreditNote")
}

fn is_line(name: &str) -> bool {
    matches!(name, "InvoiceLine" | "CreditNoteLine")
}

fn in_line(path: &[String]) -> bool {
    path.iter().any(|p| is_line(p))
}

impl XmlSink for ParsedInvoice {
    fn open(&mut self, path: &[String], attrs: &Attributes) {
        let leaf = ancestor(path, 0);
        let parent = ancestor(path, 1);

        if is_line(leaf) && self.current_line.is_none() {
            self.current_line = Some(ParsedLine::default());
            return;
        }
        if matches!(leaf, "InvoicedQuantity" | "CreditedQuantity") && is_line(parent) {
            if let (Some(line), Some(unit)) = (self.current_line.as_mut(), attr(attrs, "unitCode"))
            {
                line.unit_code = Some(unit.to_string());
            }
            return;
        }
        if in_line(path) {
            return;
        }
        if leaf == "PaymentMeans" && self.payment.is_none() {
            self.payment = Some(ParsedPayment::default());
            self.in_first_payment = true;
        }
        if leaf == "TaxSubtotal" && !self.seen_tax_total {
            self.current_subtotal = Some(ParsedSubtotal::default());
        }
    }

    fn close(&mut self, path: &[String], text: &str) {
        let leaf = ancestor(path, 0);
        let parent = ancestor(path, 1);

        // Delivery date is taken from wherever it first appears.
        if leaf == "ActualDeliveryDate" {
            first(&mut self.delivery_date, text);
            return;
        }

        if is_line(leaf) {
            if let Some(line) = self.current_line.take() {
                self.lines.push(line);
            }
            return;
        }
        if in_line(path) {
            self.handle_line_text(path, text);
            return;
        }

        match leaf {
            "PaymentMeans" => {
                self.in_first_payment = false;
                return;
            }
            "TaxSubtotal" => {
                if let Some(st) = self.current_subtotal.take() {
                    self.subtotals.push(st);
                }
                return;
            }
            "TaxTotal" => {
                self.seen_tax_total = true;
                return;
            }
            _ => {}
        }

        if is_ubl_root(parent) {
            match leaf {
                "ID" => first(&mut self.id, text),
                "IssueDate" => first(&mut self.issue_date, text),
                "DueDate" => first(&mut self.due_date, text),
                "InvoiceTypeCode" | "CreditNoteTypeCode" => first(&mut self.type_code, text),
                "DocumentCurrencyCode" => first(&mut self.currency, text),
                "Note" if !text.is_empty() => self.notes.push(text.to_string()),
                _ => {}
            }
            return;
        }

        if within(path, "AccountingSupplierParty") {
            Self::handle_party_text(&mut self.supplier, path, text);
            return;
        }
        if within(path, "AccountingCustomerParty") {
            Self::handle_party_text(&mut self.customer, path, text);
            return;
        }

        if self.in_first_payment {
            if let Some(pm) = self.payment.as_mut() {
                match leaf {
                    "PaymentMeansCode" => first(&mut pm.code, text),
                    "PaymentID" => first(&mut pm.payment_id, text),
                    "ID" if parent == "PayeeFinancialAccount" => first(&mut pm.iban, text),
                    "InstructionNote" => first(&mut pm.note, text),
                    "PaymentDueDate" => first(&mut self.payment_due_date, text),
                    _ => {}
                }
            }
            return;
        }

        if leaf == "Note" && parent == "PaymentTerms" {
            first(&mut self.payment_terms, text);
            return;
        }

        if within(path, "TaxTotal") && !self.seen_tax_total {
            if leaf == "TaxAmount" && parent == "TaxTotal" {
                first(&mut self.tax_amount, text);
            } else if let Some(st) = self.current_subtotal.as_mut() {
                match leaf {
                    "TaxableAmount" if parent == "TaxSubtotal" => {
                        first(&mut st.taxable_amount, text)
                    }
                    "TaxAmount" if parent == "TaxSubtotal" => first(&mut st.tax_amount, text),
                    "ID" if parent == "TaxCategory" => first(&mut st.category, text),
                    "Percent" if parent == "TaxCategory" => first(&mut st.percent, text),
                    "TaxExemptionReason" if parent == "TaxCategory" => {
                        first(&mut st.exemption_reason, text)
                    }
                    _ => {}
                }
            }
            return;
        }

        if parent == "LegalMonetaryTotal" {
            match leaf {
                "LineExtensionAmount" => first(&mut self.line_extension, text),
                "TaxExclusiveAmount" => first(&mut self.tax_exclusive, text),
                "TaxInclusiveAmount" => first(&mut self.tax_inclusive, text),
                "PayableAmount" => first(&mut self.payable, text),
                "ChargeTotalAmount" => first(&mut self.charge_total, text),
                "AllowanceTotalAmount" => first(&mut self.allowance_total, text),
                _ => {}
            }
        }
    }
}

impl ParsedInvoice {
    fn handle_party_text(party: &mut ParsedParty, path: &[String], text: &str) {
        let leaf = ancestor(path, 0);
        let parent = ancestor(path, 1);
        let grandparent = ancestor(path, 2);

        match leaf {
            "Name" if parent == "PartyName" => first(&mut party.name, text),
            "RegistrationName" if parent == "PartyLegalEntity" => {
                first(&mut party.registration_name, text)
            }
            "StreetName" if parent == "PostalAddress" => first(&mut party.street, text),
            "CityName" if parent == "PostalAddress" => first(&mut party.city, text),
            "PostalZone" if parent == "PostalAddress" => first(&mut party.postal_code, text),
            "IdentificationCode" if parent == "Country" && grandparent == "PostalAddress" => {
                first(&mut party.country, text)
            }
            "CompanyID" if parent == "PartyTaxScheme" => first(&mut party.tax_scheme_id, text),
            "CompanyID" if parent == "PartyLegalEntity" => {
                first(&mut party.legal_company_id, text)
            }
            "CompanyLegalForm" if parent == "PartyLegalEntity" => {
                first(&mut party.legal_form, text)
            }
            "ElectronicMail" if parent == "Contact" => first(&mut party.email, text),
            _ => {}
        }
    }

    fn handle_line_text(&mut self, path: &[String], text: &str) {
        let Some(line) = self.current_line.as_mut() else {
            return;
        };
        let leaf = ancestor(path, 0);
        let parent = ancestor(path, 1);
        let grandparent = ancestor(path, 2);

        match leaf {
            "ID" if is_line(parent) => first(&mut line.id, text),
            "InvoicedQuantity" | "CreditedQuantity" if is_line(parent) => {
                first(&mut line.quantity, text)
            }
            "LineExtensionAmount" if is_line(parent) => first(&mut line.line_total, text),
            "Name" if parent == "Item" => first(&mut line.name, text),
            "Description" if parent == "Item" => first(&mut line.description, text),
            "ID" if parent == "ClassifiedTaxCategory" && grandparent == "Item" => {
                first(&mut line.vat_category, text)
            }
            "Percent" if parent == "ClassifiedTaxCategory" && grandparent == "Item" => {
                first(&mut line.vat_percent, text)
            }
            "PriceAmount" if parent == "Price" => first(&mut line.unit_price, text),
            _ => {}
        }
    }

    fn into_invoice(self) -> Invoice {
        let dec = |s: &Option<String>| s.as_deref().and_then(parse_decimal);
        let date = |s: &Option<String>| s.as_deref().and_then(parse_date);

        let payment_means = match self.payment {
            Some(pm) => {
                let (model, reference) = split_payment_id(pm.payment_id.as_deref().unwrap_or(""));
                PaymentMeans {
                    code: pm.code,
                    iban: pm.iban.unwrap_or_default(),
                    model,
                    reference,
                    note: pm.note,
                }
            }
            None => PaymentMeans::default(),
        };

        let lines = self
            .lines
            .into_iter()
            .map(|pl| LineItem {
                quantity: dec(&pl.quantity),
                unit_price: dec(&pl.unit_price),
                line_total: dec(&pl.line_total),
                vat_percent: dec(&pl.vat_percent),
                id: pl.id.unwrap_or_default(),
                name: pl.name.unwrap_or_default(),
                description: pl.description,
                unit_code: pl.unit_code.unwrap_or_default(),
                vat_category: pl.vat_category.unwrap_or_default(),
            })
            .collect();

        let tax_subtotals = self
            .subtotals
            .into_iter()
            .map(|st| TaxSubtotal {
                percent: dec(&st.percent),
                taxable_amount: dec(&st.taxable_amount),
                tax_amount: dec(&st.tax_amount),
                category: st.category.unwrap_or_default(),
                exemption_reason: st.exemption_reason,
            })
            .collect();

        let totals = Totals {
            line_extension: dec(&self.line_extension),
            tax_exclusive: dec(&self.tax_exclusive),
            tax_inclusive: dec(&self.tax_inclusive),
            tax_amount: dec(&self.tax_amount),
            payable: dec(&self.payable),
            charge_total: dec(&self.charge_total),
            allowance_total: dec(&self.allowance_total),
        };

        Invoice {
            issue_date: date(&self.issue_date),
            due_date: date(&self.due_date).or_else(|| date(&self.payment_due_date)),
            delivery_date: date(&self.delivery_date),
            id: self.id.unwrap_or_default(),
            currency: self.currency.unwrap_or_default(),
            type_code: self.type_code.unwrap_or_default(),
            notes: self.notes,
            payment_terms: self.payment_terms,
            supplier: Some(self.supplier.into_party()),
            customer: Some(self.customer.into_party()),
            payment_means: Some(payment_means),
            lines,
            tax_subtotals,
            totals: Some(totals),
        }
    }
}

impl ParsedParty {
    fn into_party(self) -> Party {
        let tax_id = self
            .tax_scheme_id
            .or(self.legal_company_id)
            .unwrap_or_default();
        Party {
            name: self.name.or(self.registration_name).unwrap_or_default(),
            street: self.street,
            city: self.city,
            postal_code: self.postal_code,
            country_code: self.country.unwrap_or_default(),
            oib: extract_oib(&tax_id),
            tax_id,
            legal_form: self.legal_form,
            email: self.email,
        }
    }
}
