mod test_gait;
