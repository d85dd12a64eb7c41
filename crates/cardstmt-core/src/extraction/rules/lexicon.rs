//! Synonym labels for statement fields.

/// A statement field looked up through the lexicon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    TotalAmountDue,
    MinimumDue,
    CreditLimit,
    Interest,
}

impl Field {
    /// Every lexicon field, in declaration order.
    pub const ALL: [Field; 4] = [
        Field::TotalAmountDue,
        Field::MinimumDue,
        Field::CreditLimit,
        Field::Interest,
    ];

    /// Key used for this field in serialized output.
    pub fn name(&self) -> &'static str {
        match self {
            Field::TotalAmountDue => "total_amount_due",
            Field::MinimumDue => "minimum_due",
            Field::CreditLimit => "credit_limit",
            Field::Interest => "interest",
        }
    }
}

/// Ordered synonym labels per field. Earlier labels take priority.
#[derive(Debug)]
pub struct Lexicon {
    total_amount_due: &'static [&'static str],
    minimum_due: &'static [&'static str],
    credit_limit: &'static [&'static str],
    interest: &'static [&'static str],
}

impl Lexicon {
    /// Labels for a field, highest priority first.
    pub fn labels(&self, field: Field) -> &'static [&'static str] {
        match field {
            Field::TotalAmountDue => self.total_amount_due,
            Field::MinimumDue => self.minimum_due,
            Field::CreditLimit => self.credit_limit,
            Field::Interest => self.interest,
        }
    }
}

/// The built-in statement lexicon. Labels are lowercase to match
/// normalized text.
pub static LEXICON: Lexicon = Lexicon {
    total_amount_due: &[
        "total amount due",
        "amount due",
        "new balance",
        "total outstanding",
        "closing balance",
        "current balance",
    ],
    minimum_due: &["minimum amount", "minimum due", "min amount", "mad"],
    credit_limit: &["credit limit", "total credit limit", "credit line"],
    interest: &[
        "interest",
        "finance charge",
        "finance charges",
        "finance fee",
        "interest charged",
    ],
};
