//! eFiskalizacija (Porezna uprava) e-invoice parsing.
//!
//! Document shape:
//!
//! ```text
//! eRacuni
//! └── Racun                      (only the first one is parsed)
//!     ├── BrojRacuna, DatumIzdavanja, DatumDospijeca, DatumIsporuke,
//!     │   Valuta, VrstaDokumenta, Napomena*
//!     ├── Izdavatelj / Primatelj (Naziv, OIB, PravniOblik, Email)
//!     ├── NacinPlacanja          (IBAN, NazivRacuna)
//!     ├── StavkaRacuna*          (Naziv, Opis, Kolicina, JedinicaMjere,
//!     │                           JedinicnaCijena, Iznos, StopaPDV, KategorijaPDV)
//!     ├── RekapitulacijaPDV*     (KategorijaPDV, StopaPDV, Osnovica, IznosPDV,
//!     │                           RazlogOslobodjenja)
//!     └── Ukupno                 (IznosStavki, IznosBezPDV, IznosSPDV, IznosPDV,
//!                                 IznosZaPlacanje, IznosTerecenja, IznosPopusta)
//! ```
//!
//! A bare `Racun` root is accepted as well.

use tracing::{debug, warn};

use super::xml_utils::{Attributes, XmlSink, ancestor, first, walk};
use crate::core::*;

/// Country of every party in this dialect.
const ISSUING_COUNTRY: &str = "HR";

/// Parse an eFiskalizacija document into the canonical model.
pub fn from_fiskalizacija_xml(xml: &str) -> Result<Invoice, RacunError> {
    let mut parsed = ParsedRacun::default();
    walk(xml, &mut parsed)?;
    if parsed.extra_invoices > 0 {
        warn!(
            skipped = parsed.extra_invoices,
            "document batches several invoices, only the first is parsed"
        );
    }
    let invoice = parsed.into_invoice();
    debug!(
        id = %invoice.id,
        lines = invoice.lines.len(),
        "parsed eFiskalizacija invoice"
    );
    Ok(invoice)
}

#[derive(Default)]
struct ParsedRacun {
    /// Depth of the first `Racun` element once it has opened.
    racun_depth: Option<usize>,
    done: bool,
    extra_invoices: usize,

    id: Option<String>,
    issue_date: Option<String>,
    due_date: Option<String>,
    delivery_date: Option<String>,
    currency: Option<String>,
    type_code: Option<String>,
    notes: Vec<String>,

    supplier: ParsedParty,
    customer: ParsedParty,

    payment: Option<ParsedPayment>,
    in_first_payment: bool,

    lines: Vec<ParsedStavka>,
    current_line: Option<ParsedStavka>,
    subtotals: Vec<ParsedRekapitulacija>,
    current_subtotal: Option<ParsedRekapitulacija>,

    line_extension: Option<String>,
    tax_exclusive: Option<String>,
    tax_inclusive: Option<String>,
    tax_amount: Option<String>,
    payable: Option<String>,
    charge_total: Option<String>,
    allowance_total: Option<String>,
}

#[derive(Default)]
struct ParsedParty {
    name: Option<String>,
    oib: Option<String>,
    legal_form: Option<String>,
    email: Option<String>,
}

#[derive(Default)]
struct ParsedPayment {
    iban: Option<String>,
    account_name: Option<String>,
}

#[derive(Default)]
struct ParsedStavka {
    name: Option<String>,
    description: Option<String>,
    quantity: Option<String>,
    unit_code: Option<String>,
    unit_price: Option<String>,
    line_total: Option<String>,
    vat_percent: Option<String>,
    vat_category: Option<String>,
}

#[derive(Default)]
struct ParsedRekapitulacija {
    category: Option<String>,
    percent: Option<String>,
    taxable_amount: Option<String>,
    tax_amount: Option<String>,
    exemption_reason: Option<String>,
}

impl ParsedRacun {
    fn in_racun(&self, path: &[String]) -> bool {
        !self.done && self.racun_depth.is_some_and(|d| path.len() > d)
    }
}

impl XmlSink for ParsedRacun {
    fn open(&mut self, path: &[String], _attrs: &Attributes) {
        let leaf = ancestor(path, 0);
        if leaf == "Racun" {
            if self.racun_depth.is_none() {
                self.racun_depth = Some(path.len());
            } else {
                self.extra_invoices += 1;
            }
            return;
        }
        if !self.in_racun(path) {
            return;
        }
        match leaf {
            "StavkaRacuna" => self.current_line = Some(ParsedStavka::default()),
            "RekapitulacijaPDV" => self.current_subtotal = Some(ParsedRekapitulacija::default()),
            "NacinPlacanja" if self.payment.is_none() => {
                self.payment = Some(ParsedPayment::default());
                self.in_first_payment = true;
            }
            _ => {}
        }
    }

    fn close(&mut self, path: &[String], text: &str) {
        let leaf = ancestor(path, 0);
        let parent = ancestor(path, 1);

        if leaf == "Racun" && self.racun_depth == Some(path.len()) {
            self.done = true;
            return;
        }
        if !self.in_racun(path) {
            return;
        }

        match leaf {
            "StavkaRacuna" => {
                if let Some(line) = self.current_line.take() {
                    self.lines.push(line);
                }
                return;
            }
            "RekapitulacijaPDV" => {
                if let Some(st) = self.current_subtotal.take() {
                    self.subtotals.push(st);
                }
                return;
            }
            "NacinPlacanja" => {
                self.in_first_payment = false;
                return;
            }
            _ => {}
        }

        match parent {
            "Racun" => match leaf {
                "BrojRacuna" => first(&mut self.id, text),
                "DatumIzdavanja" => first(&mut self.issue_date, text),
                "DatumDospijeca" => first(&mut self.due_date, text),
                "DatumIsporuke" => first(&mut self.delivery_date, text),
                "Valuta" => first(&mut self.currency, text),
                "VrstaDokumenta" => first(&mut self.type_code, text),
                "Napomena" if !text.is_empty() => self.notes.push(text.to_string()),
                _ => {}
            },
            "Izdavatelj" => Self::handle_party_text(&mut self.supplier, leaf, text),
            "Primatelj" => Self::handle_party_text(&mut self.customer, leaf, text),
            "NacinPlacanja" if self.in_first_payment => {
                if let Some(pm) = self.payment.as_mut() {
                    match leaf {
                        "IBAN" => first(&mut pm.iban, text),
                        "NazivRacuna" => first(&mut pm.account_name, text),
                        _ => {}
                    }
                }
            }
            "StavkaRacuna" => {
                if let Some(line) = self.current_line.as_mut() {
                    match leaf {
                        "Naziv" => first(&mut line.name, text),
                        "Opis" => first(&mut line.description, text),
                        "Kolicina" => first(&mut line.quantity, text),
                        "JedinicaMjere" => first(&mut line.unit_code, text),
                        "JedinicnaCijena" => first(&mut line.unit_price, text),
                        "Iznos" => first(&mut line.line_total, text),
                        "StopaPDV" => first(&mut line.vat_percent, text),
                        "KategorijaPDV" => first(&mut line.vat_category, text),
                        _ => {}
                    }
                }
            }
            "RekapitulacijaPDV" => {
                if let Some(st) = self.current_subtotal.as_mut() {
                    match leaf {
                        "KategorijaPDV" => first(&mut st.category, text),
                        "StopaPDV" => first(&mut st.percent, text),
                        "Osnovica" => first(&mut st.taxable_amount, text),
                        "IznosPDV" => first(&mut st.tax_amount, text),
                        "RazlogOslobodjenja" => first(&mut st.exemption_reason, text),
                        _ => {}
                    }
                }
            }
            "Ukupno" => match leaf {
                "IznosStavki" => first(&mut self.line_extension, text),
                "IznosBezPDV" => first(&mut self.tax_exclusive, text),
                "IznosSPDV" => first(&mut self.tax_inclusive, text),
                "IznosPDV" => first(&mut self.tax_amount, text),
                "IznosZaPlacanje" => first(&mut self.payable, text),
                "IznosTerecenja" => first(&mut self.charge_total, text),
                "IznosPopusta" => first(&mut self.allowance_total, text),
                _ => {}
            },
            _ => {}
        }
    }
}

impl ParsedRacun {
    fn handle_party_text(party: &mut ParsedParty, leaf: &str, text: &str) {
        match leaf {
            "Naziv" => first(&mut party.name, text),
            "OIB" => first(&mut party.oib, text),
            "PravniOblik" => first(&mut party.legal_form, text),
            "Email" => first(&mut party.email, text),
            _ => {}
        }
    }

    fn into_invoice(self) -> Invoice {
        let dec = |s: &Option<String>| s.as_deref().and_then(parse_decimal);
        let date = |s: &Option<String>| s.as_deref().and_then(parse_date);

        let payment_means = match self.payment {
            Some(pm) => PaymentMeans {
                iban: pm.iban.unwrap_or_default(),
                note: pm.account_name,
                ..PaymentMeans::default()
            },
            None => PaymentMeans::default(),
        };

        // Stavke carry no identifier; number them by position.
        let lines = self
            .lines
            .into_iter()
            .enumerate()
            .map(|(i, s)| LineItem {
                id: (i + 1).to_string(),
                quantity: dec(&s.quantity),
                unit_price: dec(&s.unit_price),
                line_total: dec(&s.line_total),
                vat_percent: dec(&s.vat_percent),
                name: s.name.unwrap_or_default(),
                description: s.description,
                unit_code: s.unit_code.unwrap_or_default(),
                vat_category: s.vat_category.unwrap_or_default(),
            })
            .collect();

        let tax_subtotals = self
            .subtotals
            .into_iter()
            .map(|r| TaxSubtotal {
                percent: dec(&r.percent),
                taxable_amount: dec(&r.taxable_amount),
                tax_amount: dec(&r.tax_amount),
                category: r.category.unwrap_or_default(),
                exemption_reason: r.exemption_reason,
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
            due_date: date(&self.due_date),
            delivery_date: date(&self.delivery_date),
            id: self.id.unwrap_or_default(),
            currency: self.currency.unwrap_or_default(),
            type_code: self.type_code.unwrap_or_default(),
            notes: self.notes,
            payment_terms: None,
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
    /// The single OIB element doubles as raw tax id; there is no address.
    fn into_party(self) -> Party {
        let tax_id = self.oib.unwrap_or_default();
        Party {
            name: self.name.unwrap_or_default(),
            street: None,
            city: None,
            postal_code: None,
            country_code: ISSUING_COUNTRY.to_string(),
            oib: extract_oib(&tax_id),
            tax_id,
            legal_form: self.legal_form,
            email: self.email,
        }
    }
}
