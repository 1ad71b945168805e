use qif_core::*;
use std::{io, io::Write};
use thiserror::Error;


#[derive(Copy, Clone, Eq, PartialEq, Hash, Default, Debug)]
pub struct BasicRenderer {}

impl BasicRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Writes `document` out as QIF text.
pub fn render<W: Write>(w: &mut W, document: &Document<'_>) -> Result<(), BasicRendererError> {
    BasicRenderer::default().render(document, w)
}

#[derive(Error, Debug)]
pub enum BasicRendererError {
    #[error("an io error occurred")]
    Io(#[from] io::Error),
    #[error(transparent)]
    UnknownAccountType(#[from] UnknownAccountType),
    #[error("transaction at line {line} names an account, but there is no account list")]
    AccountContextWithoutMaster { line: usize },
}

pub trait Renderer<T, W: Write> {
    type Error;
    fn render(&self, renderable: T, write: &mut W) -> Result<(), Self::Error>;
}

/// Writes a `<code><value>` line, unless the value is empty.
fn render_field<W: Write>(w: &mut W, code: &str, value: &str) -> io::Result<()> {
    if value.is_empty() {
        return Ok(());
    }
    writeln!(w, "{}{}", code, value)
}

fn render_section<'r, R, W>(
    renderer: &BasicRenderer,
    w: &mut W,
    header: &str,
    records: &'r [R],
) -> Result<(), BasicRendererError>
where
    W: Write,
    BasicRenderer: Renderer<&'r R, W, Error = BasicRendererError>,
{
    if records.is_empty() {
        return Ok(());
    }
    writeln!(w, "{}", header)?;
    for record in records {
        renderer.render(record, w)?;
    }
    Ok(())
}

fn records<R>(section: &Option<Section<R>>) -> &[R] {
    match section {
        Some(section) => &section.records,
        None => &[],
    }
}

impl<'a, W: Write> Renderer<&'a Document<'_>, W> for BasicRenderer {
    type Error = BasicRendererError;
    fn render(&self, document: &'a Document<'_>, w: &mut W) -> Result<(), Self::Error> {
        render_section(self, w, "!Account", records(&document.accounts))?;
        render_section(self, w, "!Type:Cat", records(&document.categories))?;
        render_section(self, w, "!Type:Tag", records(&document.tags))?;
        render_section(self, w, "!Type:Security", records(&document.securities))?;

        let has_master = !records(&document.accounts).is_empty();
        let mut active: Option<&ActiveAccount<'_>> = None;
        let mut current: Option<TransactionType> = None;
        for txn in &document.transactions {
            // transactions without an account can only be written before the first switch
            if let Some(account) = txn.account.as_ref() {
                if active != Some(account) {
                    if !has_master {
                        return Err(BasicRendererError::AccountContextWithoutMaster {
                            line: txn.location.line,
                        });
                    }
                    writeln!(w, "!Account")?;
                    render_field(w, "N", &account.name)?;
                    render_field(w, "T", &account.ty)?;
                    writeln!(w, "^")?;
                    active = Some(account);
                    current = None;
                }
            }
            if current != Some(txn.ty) {
                writeln!(w, "{}", txn.ty.header())?;
                current = Some(txn.ty);
            }
            self.render(txn, w)?;
        }

        render_section(self, w, "!Type:Memorized", &document.memorized)?;
        render_section(self, w, "!Type:Prices", &document.prices)?;
        Ok(())
    }
}

impl<'a, W: Write> Renderer<&'a Account<'_>, W> for BasicRenderer {
    type Error = BasicRendererError;
    fn render(&self, account: &'a Account<'_>, w: &mut W) -> Result<(), Self::Error> {
        writeln!(w, "N{}", account.name)?;
        if !account.ty.is_empty() {
            writeln!(w, "T{}", account.account_type()?)?;
        }
        render_field(w, "D", &account.description)?;
        render_field(w, "L", &account.credit_limit)?;
        render_field(w, "$", &account.statement_balance)?;
        render_field(w, "/", &account.statement_balance_date)?;
        writeln!(w, "^")?;
        Ok(())
    }
}

impl<'a, W: Write> Renderer<&'a Category<'_>, W> for BasicRenderer {
    type Error = BasicRendererError;
    fn render(&self, category: &'a Category<'_>, w: &mut W) -> Result<(), Self::Error> {
        writeln!(w, "N{}", category.name)?;
        render_field(w, "D", &category.description)?;
        writeln!(w, "{}", if category.is_income { "I" } else { "E" })?;
        render_field(w, "R", &category.tax_schedule)?;
        for amount in &category.budget_amounts {
            writeln!(w, "B{}", amount)?;
        }
        writeln!(w, "^")?;
        Ok(())
    }
}

impl<'a, W: Write> Renderer<&'a Tag<'_>, W> for BasicRenderer {
    type Error = BasicRendererError;
    fn render(&self, tag: &'a Tag<'_>, w: &mut W) -> Result<(), Self::Error> {
        writeln!(w, "N{}", tag.name)?;
        render_field(w, "D", &tag.description)?;
        writeln!(w, "^")?;
        Ok(())
    }
}

impl<'a, W: Write> Renderer<&'a Security<'_>, W> for BasicRenderer {
    type Error = BasicRendererError;
    fn render(&self, security: &'a Security<'_>, w: &mut W) -> Result<(), Self::Error> {
        writeln!(w, "N{}", security.name)?;
        render_field(w, "S", &security.ticker)?;
        render_field(w, "T", &security.ty)?;
        render_field(w, "G", &security.risk)?;
        render_field(w, "D", &security.description)?;
        writeln!(w, "^")?;
        Ok(())
    }
}

impl<'a, W: Write> Renderer<&'a Transaction<'_>, W> for BasicRenderer {
    type Error = BasicRendererError;
    fn render(&self, txn: &'a Transaction<'_>, w: &mut W) -> Result<(), Self::Error> {
        // a quote line stands in for the date, amount and ticker lines
        let quoted = txn.ty == TransactionType::Prices || !txn.price.is_empty();
        if quoted {
            writeln!(w, "\"{}\",{},\"{}\"", txn.ticker, txn.price, txn.date)?;
        } else {
            render_field(w, "D", &txn.date)?;
        }
        if txn.ty == TransactionType::Memorized {
            writeln!(w, "K{}", txn.memorized_flag)?;
        }
        render_field(w, "C", &txn.cleared_status)?;
        render_field(w, "N", &txn.ref_no)?;
        render_field(w, "P", &txn.payee)?;
        render_field(w, "M", &txn.memo)?;
        for line in &txn.address {
            writeln!(w, "A{}", line)?;
        }
        if !quoted {
            render_field(w, "T", &txn.amount_t_code)?;
            render_field(w, "Y", &txn.ticker)?;
        }
        render_field(w, "U", &txn.amount_u_code)?;
        render_field(w, "I", &txn.interest)?;
        render_field(w, "Q", &txn.quantity)?;
        render_field(w, "O", &txn.commission)?;
        // `L[` is read before `L`, so the transfer account goes first
        if !txn.to_account.is_empty() {
            writeln!(w, "L[{}]", txn.to_account)?;
        }
        render_field(w, "L", &txn.category)?;
        for split in &txn.splits {
            self.render(split, w)?;
        }
        // budget codes run from 1 to 7; any of them appends
        for (i, amount) in txn.budget_amounts.iter().enumerate() {
            writeln!(w, "{}{}", (i + 1).min(7), amount)?;
        }
        writeln!(w, "^")?;
        Ok(())
    }
}

impl<'a, W: Write> Renderer<&'a Split<'_>, W> for BasicRenderer {
    type Error = BasicRendererError;
    fn render(&self, split: &'a Split<'_>, w: &mut W) -> Result<(), Self::Error> {
        if split.account.is_empty() {
            writeln!(w, "S{}", split.category)?;
        } else {
            writeln!(w, "S[{}]", split.account)?;
        }
        render_field(w, "$", &split.amount)?;
        render_field(w, "E", &split.memo)?;
        Ok(())
    }
}
