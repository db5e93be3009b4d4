mod vis_tests;
