mod ledger_tests;
mod valuation_tests;
