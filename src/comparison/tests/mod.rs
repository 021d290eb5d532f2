mod aggregation_tests;
mod summary_tests;
