mod projection_tests;
