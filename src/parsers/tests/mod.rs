mod extraction_tests;
