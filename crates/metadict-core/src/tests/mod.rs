mod support;

mod aggregator_tests;
