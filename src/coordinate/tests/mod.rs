mod area_tests;
