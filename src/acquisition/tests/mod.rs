mod planetary_tests;
